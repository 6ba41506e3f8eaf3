//! Application layout component
//!
//! The layout wraps every page: a header with the title and the current
//! location, the routed body, a bar with the links the mounted page offers,
//! and a footer with key hints or the location prompt.

use crate::interactive::pages::Link;
use crate::interactive::router::{use_router_handle, RouterHandle};
use iocraft::prelude::*;

/// Layout component properties
#[derive(Default, Props)]
pub struct LayoutProps<'a> {
    /// Title shown in the header
    pub title: String,
    pub children: Vec<AnyElement<'a>>,
}

/// Key hints shown in the footer outside prompt mode
const KEY_HINTS: &str = "tab next · enter open · ←/→ history · : go to · q quit";

/// Link selection and prompt text carried between key presses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutInput {
    /// Index of the highlighted link
    pub selected: usize,
    /// Path typed after `:`; `None` while the prompt is closed
    pub prompt: Option<String>,
}

/// What a key press asks of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Exit,
}

impl LayoutInput {
    /// Apply a key press against the links the mounted page offers
    pub fn handle_key(&mut self, handle: &RouterHandle, code: KeyCode, links: &[Link]) -> KeyOutcome {
        if let Some(input) = self.prompt.as_mut() {
            match code {
                KeyCode::Char(c) => input.push(c),
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Enter => {
                    let target = input.trim().to_string();
                    self.prompt = None;
                    if !target.is_empty() {
                        handle.navigate(target);
                        self.selected = 0;
                    }
                }
                KeyCode::Esc => self.prompt = None,
                _ => {}
            }
            return KeyOutcome::Continue;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return KeyOutcome::Exit,
            KeyCode::Char(':') => self.prompt = Some(String::new()),
            KeyCode::Tab | KeyCode::Down if !links.is_empty() => {
                self.selected = (self.selected + 1) % links.len();
            }
            KeyCode::BackTab | KeyCode::Up if !links.is_empty() => {
                self.selected = (self.selected + links.len() - 1) % links.len();
            }
            KeyCode::Enter => {
                if let Some(link) = links.get(self.selected) {
                    handle.navigate(link.to.as_str());
                    self.selected = 0;
                }
            }
            KeyCode::Left | KeyCode::Backspace => {
                if handle.go_back() {
                    self.selected = 0;
                }
            }
            KeyCode::Right => {
                if handle.go_forward() {
                    self.selected = 0;
                }
            }
            _ => {}
        }
        KeyOutcome::Continue
    }
}

/// Shared chrome around the routed page
#[component]
pub fn Layout<'a>(mut hooks: Hooks, props: &mut LayoutProps<'a>) -> impl Into<AnyElement<'a>> {
    let handle = use_router_handle(&mut hooks);
    let mut system = hooks.use_context_mut::<SystemContext>();

    let input = hooks.use_state(LayoutInput::default);
    let should_exit = hooks.use_state(|| false);

    let links = handle.current_links();

    hooks.use_terminal_events({
        let handle = handle.clone();
        let links = links.clone();
        let mut input = input;
        let mut should_exit = should_exit;

        move |event| match event {
            TerminalEvent::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                let mut next = input.read().clone();
                if next.handle_key(&handle, code, &links) == KeyOutcome::Exit {
                    should_exit.set(true);
                }
                input.set(next);
            }
            _ => {}
        }
    });

    if should_exit.get() {
        system.exit();
    }

    let location = handle.location().to_string();
    let back_marker = if handle.can_go_back() { "◀ " } else { "  " };
    let forward_marker = if handle.can_go_forward() { " ▶" } else { "  " };
    let title = props.title.clone();
    let LayoutInput {
        selected,
        prompt: prompt_input,
    } = input.read().clone();
    let selected = selected.min(links.len().saturating_sub(1));

    element! {
        View(flex_direction: FlexDirection::Column, width: 100pct) {
            // Header
            View(
                border_style: BorderStyle::Round,
                border_color: Color::Rgb { r: 100, g: 149, b: 237 },
                padding_left: 1,
                padding_right: 1,
                justify_content: JustifyContent::SpaceBetween,
                width: 100pct,
            ) {
                Text(content: title, weight: Weight::Bold, color: Color::Cyan)
                Text(content: format!("{}{}{}", back_marker, location, forward_marker), color: Color::Grey)
            }

            // Routed body
            View(
                flex_direction: FlexDirection::Column,
                flex_grow: 1.0,
                padding_left: 2,
                padding_right: 2,
                padding_top: 1,
                padding_bottom: 1,
            ) {
                #(&mut props.children)
            }

            // Links bar
            View(padding_left: 1, gap: 2) {
                #(links.iter().enumerate().map(|(index, link)| {
                    let active = index == selected;
                    element! {
                        View(key: format!("link-{}", index)) {
                            Text(
                                content: if active { format!("[{}]", link.label) } else { format!(" {} ", link.label) },
                                color: if active { Color::Cyan } else { Color::White },
                                weight: if active { Weight::Bold } else { Weight::Normal },
                            )
                        }
                    }
                }).collect::<Vec<_>>())
            }

            // Footer
            View(padding_left: 1) {
                #(match &prompt_input {
                    Some(input) => element! {
                        View {
                            Text(content: "go to ", color: Color::Yellow)
                            Text(content: format!("{}█", input))
                        }
                    },
                    None => element! {
                        View {
                            Text(content: KEY_HINTS, color: Color::DarkGrey)
                        }
                    },
                })
            }
        }
    }
}
