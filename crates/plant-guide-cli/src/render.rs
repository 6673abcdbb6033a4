use colored::{ColoredString, Colorize};

use plant_guide_core::{CategorizedGuide, CategoryDef, GuideSection};

/// Shown when the guide input was absent or empty
pub const INVALID_DATA_MESSAGE: &str = "Invalid agricultural data";

/// Header above raw guide text when no category could be found
pub const RAW_HEADER: &str = "📋 Agricultural Information:";

/// Label color for `label: text` bullets
const LABEL_COLOR: &str = "#92400e";

/// Render a categorized guide for the terminal
pub fn render_guide(guide: &CategorizedGuide) -> String {
    match guide {
        CategorizedGuide::InvalidInput => format!("{}\n", INVALID_DATA_MESSAGE.yellow()),
        CategorizedGuide::NoStructure { raw } => {
            format!("{}\n{}\n", RAW_HEADER.yellow().bold(), raw)
        }
        CategorizedGuide::Sections { sections } => sections
            .iter()
            .map(render_section)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn render_section(section: &GuideSection) -> String {
    let cat = &section.category;
    let mut out = format!(
        "{} {}\n",
        cat.icon,
        paint(&cat.title, &cat.color).bold()
    );

    for bullet in &section.bullets {
        let marker = paint("•", &cat.color).bold();
        match &bullet.label {
            Some(label) => out.push_str(&format!(
                "  {} {}: {}\n",
                marker,
                paint(label, LABEL_COLOR).bold(),
                bullet.text
            )),
            None => out.push_str(&format!("  {} {}\n", marker, bullet.text)),
        }
    }

    out
}

/// Render one line per category with its keywords
pub fn render_category(cat: &CategoryDef) -> String {
    format!(
        "{} {} ({})\n    {}",
        cat.icon,
        paint(&cat.title, &cat.color).bold(),
        cat.id.dimmed(),
        cat.keywords.join(", ")
    )
}

fn paint(text: &str, hex: &str) -> ColoredString {
    match hex_rgb(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

/// `#rrggbb` -> (r, g, b)
fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
