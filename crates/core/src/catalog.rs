//! Built-in decks.

use crate::types::{Column, DeckFile, DeckStyle, ImagePlacement, Rgb, SlideSpec};

/// Names accepted by [`builtin_deck`].
pub const BUILTIN_DECKS: &[&str] = &["valuezen"];

/// Look up a built-in deck by name.
pub fn builtin_deck(name: &str) -> Option<DeckFile> {
    match name.to_lowercase().as_str() {
        "valuezen" => Some(valuezen_deck()),
        _ => None,
    }
}

/// The four-slide Valuezen pitch on an orange background.
pub fn valuezen_deck() -> DeckFile {
    let problem = SlideSpec::bullets(
        "Why Valuezen? (Problem Statement & Opportunity)",
        [
            "• Decision-making in logistics is slow due to lack of real-time, quantifiable value insights.",
            "• Mid-market and SMBs struggle with cost justification, integration complexity, and slow adoption.",
            "• Existing platforms offer data but lack personalized ROI-driven intelligence.",
        ],
    )
    .with_image(ImagePlacement::new("logo.png", 8.0, 0.2, 1.5));

    let solution = SlideSpec::bullets(
        "What is Valuezen? (Solution Overview)",
        [
            "• AI-powered value delivery platform for logistics & transportation.",
            "• Plug-and-play API-first approach for rapid deployment.",
            "• Live value calculators to showcase impact in cost, time, and efficiency.",
        ],
    )
    .with_image(ImagePlacement::new("solution_image.png", 0.5, 3.5, 3.0));

    let benefits = SlideSpec::two_column(
        "Key Benefits (Before vs. After Valuezen)",
        Column::new(
            "Before:",
            [
                "• Fragmented data, unclear ROI.",
                "• Slow customer onboarding & adoption.",
                "• Lack of AI-driven decision intelligence.",
            ],
        ),
        Column::new(
            "After:",
            [
                "• API-first selling → faster deployment, proven cost savings.",
                "• AI/ML-driven value insights → predictive decision-making.",
                "• Free-tier trials → SMB adoption & viral expansion.",
            ],
        ),
    );

    let gtm = SlideSpec::long_form(
        "GTM Strategy & Expansion Plan",
        [
            "Target Mid-Market with Rapid Deployment & API Integration",
            "  • Plug-and-play solution with API-first selling approach.",
            "  • Faster response times → reduced downtime & automation-led savings.",
            "  • Build case studies to show mid-market efficiency gains.",
            "",
            "Drive SMB Adoption with Free Tier & Simplified Onboarding",
            "  • Simplified UX → highlight ease of use & time savings in marketing.",
            "  • Free-tier tracking service for small carriers & brokers.",
            "  • Leverage referrals & integrate with popular TMS platforms.",
            "",
            "Expand into Latin America & APAC Through Mid-Market Penetration",
            "  • Localized content, multilingual support, and regional partnerships.",
            "  • Flexible pricing to match emerging market needs.",
            "",
            "Strengthen Competitive Differentiation with AI & Predictive Insights",
            "  • AI/ML-powered predictive ETA & automation as differentiators.",
            "  • Target C-level executives with data-driven supply chain intelligence.",
            "  • Position Valuezen as a decision intelligence leader.",
        ],
    );

    DeckFile {
        file_name: Some("Valuezen_Presentation.pptx".to_string()),
        style: DeckStyle::default().with_background(Rgb::ORANGE),
        slides: vec![problem, solution, benefits, gtm],
    }
}
