//! User list and user detail pages

use super::{Link, Page, PageContext};
use iocraft::prelude::*;

/// A directory entry shown by the user pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct User {
    pub id: u32,
    pub name: &'static str,
    pub role: &'static str,
}

/// Built-in user directory
pub const USERS: &[User] = &[
    User { id: 1, name: "Ada", role: "Maintainer" },
    User { id: 2, name: "Grace", role: "Reviewer" },
    User { id: 3, name: "Linus", role: "Contributor" },
    User { id: 42, name: "Marvin", role: "Guest" },
];

/// Find a user by the raw `:id` parameter
pub fn find_user(id: &str) -> Option<&'static User> {
    let id: u32 = id.parse().ok()?;
    USERS.iter().find(|user| user.id == id)
}

/// Lists every user
pub struct UsersListPage;

impl Page for UsersListPage {
    fn name(&self) -> &'static str {
        "users-list"
    }

    fn links(&self, _ctx: &PageContext) -> Vec<Link> {
        let mut links: Vec<Link> = USERS
            .iter()
            .map(|user| Link::new(user.name, format!("/users/{}", user.id)))
            .collect();
        links.push(Link::new("Home", "/"));
        links
    }

    fn render(&self, _ctx: &PageContext) -> AnyElement<'static> {
        element! {
            View(flex_direction: FlexDirection::Column, gap: 1) {
                Text(content: "Users", weight: Weight::Bold, color: Color::Cyan)
                View(flex_direction: FlexDirection::Column) {
                    #(USERS.iter().map(|user| element! {
                        View(key: format!("user-{}", user.id)) {
                            View(width: 6) {
                                Text(content: format!("#{}", user.id), color: Color::Grey)
                            }
                            View(width: 12) {
                                Text(content: user.name, weight: Weight::Bold)
                            }
                            Text(content: user.role, color: Color::Grey)
                        }
                    }).collect::<Vec<_>>())
                }
            }
        }
        .into()
    }
}

/// Shows a single user selected by `:id`
pub struct UserDetailPage;

impl Page for UserDetailPage {
    fn name(&self) -> &'static str {
        "user-detail"
    }

    fn links(&self, ctx: &PageContext) -> Vec<Link> {
        let mut links = vec![Link::new("All users", "/users")];

        // Offer the next user in the directory, wrapping around
        if let Some(user) = ctx.param("id").and_then(find_user) {
            if let Some(index) = USERS.iter().position(|u| u.id == user.id) {
                let next = &USERS[(index + 1) % USERS.len()];
                links.push(Link::new(
                    format!("Next: {}", next.name),
                    format!("/users/{}", next.id),
                ));
            }
        }
        links
    }

    fn render(&self, ctx: &PageContext) -> AnyElement<'static> {
        let id = ctx.param("id").unwrap_or_default().to_string();
        let tab = ctx.location.query("tab").map(str::to_string);

        match find_user(&id) {
            Some(user) => element! {
                View(flex_direction: FlexDirection::Column, gap: 1) {
                    Text(content: user.name, weight: Weight::Bold, color: Color::Cyan)
                    Text(content: format!("Id: {}", user.id))
                    Text(content: format!("Role: {}", user.role))
                    #(tab.map(|tab| element! {
                        Text(content: format!("Tab: {}", tab), color: Color::Grey)
                    }))
                }
            }
            .into(),
            None => element! {
                View(flex_direction: FlexDirection::Column, gap: 1) {
                    Text(content: "Unknown user", weight: Weight::Bold, color: Color::Red)
                    Text(content: format!("No user has id '{}'.", id), color: Color::Grey)
                }
            }
            .into(),
        }
    }
}
