use crate::controllers::carousel::Direction;

/// Focus facts the keyboard handler depends on, read from the page before
/// interpreting a key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusContext {
    pub hamburger_focused: bool,
    pub nav_open: bool,
    pub focused_indicator: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ToggleNav,
    CloseNav,
    StepCarousel { from: usize, direction: Direction },
}

/// Maps a `KeyboardEvent.key` to the actions it triggers. Arrow steps also
/// suppress the browser's default scrolling.
pub fn interpret(key: &str, focus: FocusContext) -> Vec<KeyAction> {
    let mut actions = Vec::new();
    if key == "Enter" && focus.hamburger_focused {
        actions.push(KeyAction::ToggleNav);
    }
    if key == "Escape" && focus.nav_open {
        actions.push(KeyAction::CloseNav);
    }
    if let Some(from) = focus.focused_indicator {
        let direction = match key {
            "ArrowLeft" => Some(Direction::Previous),
            "ArrowRight" => Some(Direction::Next),
            _ => None,
        };
        if let Some(direction) = direction {
            actions.push(KeyAction::StepCarousel { from, direction });
        }
    }
    actions
}

pub fn prevents_default(actions: &[KeyAction]) -> bool {
    actions
        .iter()
        .any(|action| matches!(action, KeyAction::StepCarousel { .. }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_only_toggles_on_hamburger() {
        let focused = FocusContext {
            hamburger_focused: true,
            ..FocusContext::default()
        };
        assert_eq!(interpret("Enter", focused), vec![KeyAction::ToggleNav]);
        assert!(interpret("Enter", FocusContext::default()).is_empty());
    }

    #[test]
    fn escape_only_when_open() {
        let open = FocusContext {
            nav_open: true,
            ..FocusContext::default()
        };
        assert_eq!(interpret("Escape", open), vec![KeyAction::CloseNav]);
        assert!(interpret("Escape", FocusContext::default()).is_empty());
    }

    #[test]
    fn arrows_need_a_focused_indicator() {
        let on_dot = FocusContext {
            focused_indicator: Some(1),
            ..FocusContext::default()
        };
        let actions = interpret("ArrowRight", on_dot);
        assert_eq!(
            actions,
            vec![KeyAction::StepCarousel {
                from: 1,
                direction: Direction::Next
            }]
        );
        assert!(prevents_default(&actions));
        assert!(interpret("ArrowLeft", FocusContext::default()).is_empty());
        assert!(interpret("ArrowUp", on_dot).is_empty());
    }
}
