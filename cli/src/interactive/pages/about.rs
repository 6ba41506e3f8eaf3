//! About page

use super::{Link, Page, PageContext};
use iocraft::prelude::*;

const KEY_HELP: &[(&str, &str)] = &[
    ("Tab / Shift+Tab", "select the next or previous link"),
    ("Enter", "follow the selected link"),
    ("Left / Backspace", "go back"),
    ("Right", "go forward"),
    (":", "type a path to open"),
    ("q / Esc", "quit"),
];

/// Describes the application and its key bindings
pub struct AboutPage;

impl Page for AboutPage {
    fn name(&self) -> &'static str {
        "about"
    }

    fn links(&self, _ctx: &PageContext) -> Vec<Link> {
        vec![Link::new("Home", "/")]
    }

    fn render(&self, ctx: &PageContext) -> AnyElement<'static> {
        // Anything below /about lands here too
        let subpath = ctx
            .location
            .pathname
            .strip_prefix(ctx.matched.url.as_str())
            .filter(|rest| !rest.is_empty())
            .map(|rest| format!("(no section named '{}')", rest.trim_start_matches('/')));

        element! {
            View(flex_direction: FlexDirection::Column, gap: 1) {
                Text(content: "About bx", weight: Weight::Bold, color: Color::Cyan)
                Text(
                    content: "Every screen is chosen from an ordered route table: the first route that matches the current location wins.",
                    color: Color::White,
                )
                #(subpath.map(|note| element! { Text(content: note, color: Color::Yellow) }))
                View(flex_direction: FlexDirection::Column) {
                    #(KEY_HELP.iter().map(|(keys, help)| element! {
                        View(key: *keys) {
                            View(width: 20) {
                                Text(content: *keys, weight: Weight::Bold)
                            }
                            Text(content: *help, color: Color::Grey)
                        }
                    }).collect::<Vec<_>>())
                }
            }
        }
        .into()
    }
}
