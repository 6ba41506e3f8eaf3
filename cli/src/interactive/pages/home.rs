//! Home page

use super::{Link, Page, PageContext};
use crate::interactive::components::BxLogo;
use iocraft::prelude::*;

/// Landing page with the logo and a short introduction
pub struct HomePage;

impl Page for HomePage {
    fn name(&self) -> &'static str {
        "home"
    }

    fn links(&self, _ctx: &PageContext) -> Vec<Link> {
        vec![Link::new("Users", "/users"), Link::new("About", "/about")]
    }

    fn render(&self, _ctx: &PageContext) -> AnyElement<'static> {
        element! {
            View(flex_direction: FlexDirection::Column, gap: 1) {
                BxLogo
                Text(
                    content: "Welcome to bx.",
                    weight: Weight::Bold,
                    color: Color::White,
                )
                Text(
                    content: "Pick a link below with Tab and press Enter, or press ':' to type a path.",
                    color: Color::Grey,
                )
            }
        }
        .into()
    }
}
