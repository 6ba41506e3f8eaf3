//! bx logo component
//!
//! ASCII art logo rendered with a vertical color gradient.

use iocraft::prelude::*;

// Static logo lines with individual colors for gradient effect
pub const BX_LOGO_LINES: &[&str] = &[
    "██████  ██   ██",
    "██   ██  ██ ██",
    "██████    ███",
    "██   ██  ██ ██",
    "██████  ██   ██",
];

// Color gradient from bright cyan to deep blue
pub const LOGO_COLORS: &[(u8, u8, u8)] = &[
    (0, 230, 255),
    (0, 200, 240),
    (0, 170, 225),
    (0, 140, 210),
    (0, 110, 195),
];

/// bx ASCII art logo with gradient colors
#[component]
pub fn BxLogo(_hooks: Hooks) -> impl Into<AnyElement<'static>> {
    element! {
        View(key: "logo-content", flex_direction: FlexDirection::Column) {
            #(BX_LOGO_LINES.iter().enumerate().map(|(i, line)| {
                let color = LOGO_COLORS.get(i).unwrap_or(&(0, 90, 180));
                element! {
                    Text(
                        content: *line,
                        color: Color::Rgb { r: color.0, g: color.1, b: color.2 },
                        weight: Weight::Bold,
                    )
                }
            }).collect::<Vec<_>>())
        }
    }
}
