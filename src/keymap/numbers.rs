//! Number pad and function keys.
//!
//! ```text
//! ___ ___ ___ ___ ___ ___ ___  7   8   9   p  ___      F7  F8  F9  F12
//! ___ ___ ___ ___ ___ ___ ___  4   5   6   ;           F4  F5  F6  F11
//! ___ ___ ___ ___ ___ ___ ___  1   2   3   /           F1  F2  F3  F10
//! ```

use super::table::{to, Binding, LayerTable};
use super::Tables;
use crate::layers::LayerId;
use crate::models::{Modifier, Rule};
use crate::rules::RuleResult;

use Binding::{Block, Pass};

const LEFT_TOP: [(&str, Binding); 7] = [
    ("tab", Block),
    ("q", Block),
    ("w", Block),
    ("e", Block),
    ("r", Block),
    ("t", Block),
    ("y", Block),
];

const EDGE: [(&str, Binding); 4] = [
    ("open_bracket", Block),
    ("close_bracket", Block),
    ("backslash", Block),
    ("caps_lock", Block),
];

const LEFT_BOTTOM: [(&str, Binding); 9] = [
    ("quote", Block),
    ("return_or_enter", Block),
    ("left_shift", Block),
    ("z", Block),
    ("x", Block),
    ("c", Block),
    ("v", Block),
    ("b", Block),
    ("n", Block),
];

/// Digits under the right hand; `h` latches the function layer.
pub(super) fn number(tables: &Tables<'_>) -> RuleResult<Vec<Rule>> {
    let mut table = LayerTable::new(tables.factory);
    table.bind(&LEFT_TOP)?;
    table.bind(&[("u", to("7")), ("i", to("8")), ("o", to("9")), ("p", Pass)])?;
    table.bind(&EDGE)?;
    table.bind(&[
        ("a", Block),
        ("s", Block),
        (
            "d",
            Binding::Send(
                "grave_accent_and_tilde",
                &[Modifier::LeftCommand, Modifier::LeftShift],
            ),
        ),
        (
            "f",
            Binding::Send("grave_accent_and_tilde", &[Modifier::LeftCommand]),
        ),
        ("g", Block),
    ])?;
    table.extend(tables.activator.enter(LayerId::Function)?);
    table.bind(&[
        ("j", to("4")),
        ("k", to("5")),
        ("l", to("6")),
        ("semicolon", Pass),
    ])?;
    table.bind(&LEFT_BOTTOM)?;
    table.bind(&[
        ("m", to("1")),
        ("comma", to("2")),
        ("period", to("3")),
        ("slash", Pass),
        ("right_shift", Block),
        ("spacebar", to("0")),
    ])?;
    Ok(table.into_rules())
}

/// Function keys on the number pad positions.
pub(super) fn function(tables: &Tables<'_>) -> RuleResult<Vec<Rule>> {
    let mut table = LayerTable::new(tables.factory);
    table.bind(&LEFT_TOP)?;
    table.bind(&[
        ("u", to("f7")),
        ("i", to("f8")),
        ("o", to("f9")),
        ("p", to("f12")),
    ])?;
    table.bind(&EDGE)?;
    table.bind(&[
        ("a", Block),
        ("s", Block),
        ("d", Block),
        ("f", Block),
        ("g", Block),
        ("h", Block),
        ("j", to("f4")),
        ("k", to("f5")),
        ("l", to("f6")),
        ("semicolon", to("f11")),
    ])?;
    table.bind(&LEFT_BOTTOM)?;
    table.bind(&[
        ("m", to("f1")),
        ("comma", to("f2")),
        ("period", to("f3")),
        ("slash", to("f10")),
        ("right_shift", Block),
    ])?;
    Ok(table.into_rules())
}
