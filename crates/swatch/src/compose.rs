//! Style recommendations assembled from fixed text blocks.

use crate::profile::{Complexion, HeightCategory, ToneBucket};
use std::fmt;

const SECTION_BREAK: &str = "\n\n\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: &'static str,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleGuide {
    pub height_category: HeightCategory,
    pub tone_bucket: ToneBucket,
    pub sections: Vec<Section>,
}

impl fmt::Display for StyleGuide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                f.write_str(SECTION_BREAK)?;
            }
            write!(f, "{}\n\n{}", section.heading, section.body)?;
        }
        Ok(())
    }
}

pub fn color_advice(bucket: ToneBucket) -> &'static str {
    match bucket {
        ToneBucket::Soft => {
            "Jewel tones (emerald, sapphire) and pastels complement your fair complexion beautifully."
        }
        ToneBucket::Versatile => {
            "You can rock almost any color! Earth tones and rich jewels work especially well."
        }
        ToneBucket::Bold => {
            "Bold, vibrant colors and deep jewel tones create stunning contrast with your skin tone."
        }
    }
}

pub fn height_advice(category: HeightCategory) -> &'static str {
    match category {
        HeightCategory::Shorter => {
            "Vertical lines and monochromatic outfits will elongate your silhouette. High-waisted bottoms are your best friend!"
        }
        HeightCategory::Taller => {
            "You can pull off bold patterns and oversized fits with ease. Experiment with layering and wide belts."
        }
        HeightCategory::Average => {
            "Your proportions are versatile - both fitted and slightly relaxed pieces work great for you."
        }
    }
}

/// Pure: the same inputs always give the same guide, byte for byte.
pub fn compose(height_cm: f64, complexion: &Complexion, color: &str, material: &str) -> StyleGuide {
    let height_category = HeightCategory::from_cm(height_cm);
    let tone_bucket = complexion.bucket();

    let sections = vec![
        Section {
            heading: "🎨 COLOR TIPS",
            body: format!(
                "{}\n\nYour chosen color ({color}) works great as a statement piece or accent. Pair it with neutrals like white, navy, or beige for a balanced look.",
                color_advice(tone_bucket)
            ),
        },
        Section {
            heading: "📏 STYLE FOR YOUR HEIGHT",
            body: format!(
                "{}\n\nRemember: Balance is key. If your top is loose, keep the bottom fitted, and vice versa.",
                height_advice(height_category)
            ),
        },
        Section {
            heading: "🧵 MATERIAL INSIGHT",
            body: format!(
                "{material} is versatile and comfortable. It pairs well with denim for casual looks or can be dressed up with tailored pieces for formal occasions."
            ),
        },
        Section {
            heading: "👔 3 OUTFIT IDEAS",
            body: outfit_ideas(color, material),
        },
        Section {
            heading: "👟 QUICK ACCESSORY GUIDE",
            body: [
                "- Shoes: Match the formality - sneakers (casual), loafers (smart-casual), dress shoes (formal)",
                "- Keep jewelry minimal - one statement piece is enough",
                "- Belt and shoes should match in color",
            ]
            .join("\n"),
        },
        Section {
            heading: "💡 KEY TAKEAWAY",
            body: format!(
                "Focus on well-fitted clothes that make you feel confident. Your color ({color}) and material choice ({material}) are great foundations - build around them with versatile basics!"
            ),
        },
    ];

    StyleGuide {
        height_category,
        tone_bucket,
        sections,
    }
}

fn outfit_ideas(color: &str, material: &str) -> String {
    [
        ("Casual Day Out", "top + dark jeans + white sneakers"),
        ("Smart Casual", "shirt + chinos + loafers + blazer (optional)"),
        (
            "Evening Look",
            "piece + black trousers/skirt + dress shoes + minimal jewelry",
        ),
    ]
    .iter()
    .enumerate()
    .map(|(i, (title, pieces))| format!("**{}. {title}**\n{color} {material} {pieces}", i + 1))
    .collect::<Vec<_>>()
    .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::SkinTone;

    fn medium() -> Complexion {
        Complexion::from(SkinTone::Medium)
    }

    #[test]
    fn test_compose_is_deterministic() {
        let a = compose(170.0, &medium(), "#112233", "Cotton").to_string();
        let b = compose(170.0, &medium(), "#112233", "Cotton").to_string();
        assert_eq!(a, b);
    }

    #[test]
    fn test_height_boundaries_pick_advice() {
        let average = height_advice(HeightCategory::Average);
        for cm in [160.0, 180.0] {
            let text = compose(cm, &medium(), "#112233", "Cotton").to_string();
            assert!(text.contains(average), "{cm}");
        }
        let short = compose(159.0, &medium(), "#112233", "Cotton").to_string();
        assert!(short.contains(height_advice(HeightCategory::Shorter)));
        let tall = compose(181.0, &medium(), "#112233", "Cotton").to_string();
        assert!(tall.contains(height_advice(HeightCategory::Taller)));
    }

    #[test]
    fn test_six_sections_in_order() {
        let guide = compose(170.0, &medium(), "#112233", "Cotton");
        let headings: Vec<_> = guide.sections.iter().map(|s| s.heading).collect();
        assert_eq!(
            headings,
            vec![
                "🎨 COLOR TIPS",
                "📏 STYLE FOR YOUR HEIGHT",
                "🧵 MATERIAL INSIGHT",
                "👔 3 OUTFIT IDEAS",
                "👟 QUICK ACCESSORY GUIDE",
                "💡 KEY TAKEAWAY",
            ]
        );
    }

    #[test]
    fn test_outfit_lines_interpolate_color_and_material() {
        let guide = compose(170.0, &medium(), "#112233", "Linen");
        let outfits = &guide.sections[3].body;
        assert_eq!(outfits.matches("#112233 Linen ").count(), 3);
        assert!(outfits.starts_with("**1. Casual Day Out**\n#112233 Linen top + dark jeans"));
        assert!(guide.sections[5].body.contains("Your color (#112233) and material choice (Linen)"));
    }

    #[test]
    fn test_unrecognized_tone_gets_bold_advice() {
        let guide = compose(170.0, &Complexion::Unrecognized("olive".into()), "#000000", "Silk");
        assert_eq!(guide.tone_bucket, ToneBucket::Bold);
        assert!(guide.to_string().starts_with(&format!(
            "🎨 COLOR TIPS\n\n{}",
            color_advice(ToneBucket::Bold)
        )));
    }

    #[test]
    fn test_nan_height_is_average() {
        let guide = compose(f64::NAN, &medium(), "#112233", "Cotton");
        assert_eq!(guide.height_category, HeightCategory::Average);
    }
}
