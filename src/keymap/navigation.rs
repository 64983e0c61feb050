//! Navigation, visual mode and the sticky-modifier layer.
//!
//! ```text
//! ___ ___ ___ ___ ___ ___ HOM PGU PGD END ___ ___
//! ___  ^   ⌥   ⌘  ___ ___  ←   ↓   ↑   →  ___
//! ___ ___ ___ ___ ___ ___ ___ ___ ___ ___ ___
//!                        ⇧
//! ```

use super::table::{shifted, to, Binding, LayerTable};
use super::Tables;
use crate::layers::LayerId;
use crate::models::{KeyEvent, Modifier, Rule};
use crate::rules::{Chord, RuleResult};

use Binding::{Block, Sticky};

const TOP_ROW: [(&str, Binding); 15] = [
    ("tab", Block),
    ("q", Block),
    ("w", Block),
    ("e", Block),
    ("r", Block),
    ("t", Block),
    ("y", to("home")),
    ("u", to("page_up")),
    ("i", to("page_down")),
    ("o", to("end")),
    ("p", Block),
    ("open_bracket", Block),
    ("close_bracket", Block),
    ("backslash", Block),
    ("caps_lock", Block),
];

const HOME_ROW: [(&str, Binding); 8] = [
    ("s", to("left_control")),
    ("d", to("left_option")),
    ("f", to("left_command")),
    ("g", Block),
    ("h", to("left_arrow")),
    ("j", to("down_arrow")),
    ("k", to("up_arrow")),
    ("l", to("right_arrow")),
];

const BOTTOM_ROW: [(&str, Binding); 15] = [
    ("semicolon", Block),
    ("quote", Block),
    ("return_or_enter", Block),
    ("left_shift", Block),
    ("z", Block),
    ("x", Block),
    ("c", Block),
    ("v", Block),
    ("b", Block),
    ("n", Block),
    ("m", Block),
    ("comma", Block),
    ("period", Block),
    ("slash", Block),
    ("right_shift", Block),
];

/// Arrows and paging; `a` leaves, a lone spacebar tap enters visual mode.
pub(super) fn navigation(tables: &Tables<'_>) -> RuleResult<Vec<Rule>> {
    let mut table = LayerTable::new(tables.factory);
    table.bind(&TOP_ROW)?;
    table.extend(tables.activator.exits(LayerId::Navigation)?);
    // d+f together holds command+option
    table.extend([tables.factory.simultaneous_chord(Chord {
        keys: vec!["d", "f"],
        outputs: vec![KeyEvent::new("left_command").with_modifiers(vec![Modifier::LeftOption])],
        activate: None,
    })?]);
    table.bind(&HOME_ROW)?;
    table.bind(&BOTTOM_ROW)?;
    table.extend(tables.activator.enter(LayerId::VisualMode)?);
    Ok(table.into_rules())
}

/// Navigation with shift added to every output, for selecting text.
pub(super) fn visual_mode(tables: &Tables<'_>) -> RuleResult<Vec<Rule>> {
    let with_shift = |row: &[(&'static str, Binding)]| -> Vec<(&'static str, Binding)> {
        row.iter().map(|(key, binding)| (*key, shifted(*binding))).collect()
    };

    let mut table = LayerTable::new(tables.factory);
    table.bind(&with_shift(&TOP_ROW))?;
    table.extend(tables.activator.exits(LayerId::VisualMode)?);
    table.bind(&with_shift(&HOME_ROW))?;
    table.bind(&BOTTOM_ROW)?;
    Ok(table.into_rules())
}

/// Sticky modifiers on the home row; `a` enters navigation.
pub(super) fn modifier(tables: &Tables<'_>) -> RuleResult<Vec<Rule>> {
    let mut table = LayerTable::new(tables.factory);
    table.bind(&[
        ("tab", Block),
        ("q", Block),
        ("w", Block),
        ("e", Block),
        ("r", Block),
        ("t", Block),
        ("y", Block),
        ("u", Block),
        ("i", Block),
        ("o", Block),
        ("p", Block),
        ("open_bracket", Block),
        ("close_bracket", Block),
        ("backslash", Block),
        ("caps_lock", Block),
    ])?;
    table.extend(tables.activator.enter(LayerId::Navigation)?);
    table.bind(&[
        ("s", Sticky(Modifier::LeftControl)),
        ("d", Sticky(Modifier::LeftOption)),
        ("f", Sticky(Modifier::LeftCommand)),
        ("g", to("caps_lock")),
        ("h", Block),
        ("j", Block),
        ("k", Block),
        ("l", Block),
    ])?;
    table.bind(&BOTTOM_ROW)?;
    table.bind(&[("spacebar", Sticky(Modifier::LeftShift))])?;
    Ok(table.into_rules())
}
