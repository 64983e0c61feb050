//! Symbol layers.
//!
//! ```text
//! ___  '   <   >   "   %   ~   &   (   )   _  ___
//! ___  !   -   +   =   #   `   |   {   }  ___
//! ___  ^   /   *   \  ___  @  EMO  [   ]   $
//! ```

use super::table::{to, Binding, LayerTable};
use super::Tables;
use crate::models::{Modifier, Rule};
use crate::rules::RuleResult;

use Binding::{Block, Send};
use Modifier::{LeftCommand, LeftControl, LeftShift, RightShift};

/// Left-hand half, held from the right pinky.
pub(super) fn left(tables: &Tables<'_>) -> RuleResult<Vec<Rule>> {
    let mut table = LayerTable::new(tables.factory);
    table.bind(&[
        ("tab", Block),
        ("q", to("quote")),
        ("w", Send("comma", &[LeftShift])),
        ("e", Send("period", &[LeftShift])),
        ("r", Send("quote", &[LeftShift])),
        ("t", Send("5", &[LeftShift])),
        ("u", Send("tab", &[LeftControl])),
        ("i", Send("tab", &[LeftControl, LeftShift])),
        ("caps_lock", Block),
        ("a", Send("1", &[RightShift])),
        ("s", to("hyphen")),
        ("d", Send("equal_sign", &[LeftShift])),
        ("f", to("equal_sign")),
        ("g", Send("3", &[RightShift])),
        ("left_shift", Block),
        ("z", Send("6", &[RightShift])),
        ("x", to("slash")),
        ("c", Send("8", &[LeftShift])),
        ("v", to("backslash")),
    ])?;
    Ok(table.into_rules())
}

/// Right-hand half plus window switching, held from tab.
pub(super) fn right(tables: &Tables<'_>) -> RuleResult<Vec<Rule>> {
    let mut table = LayerTable::new(tables.factory);
    table.bind(&[
        ("e", Send("tab", &[LeftCommand, LeftShift])),
        ("r", Send("tab", &[LeftCommand])),
        ("y", Send("grave_accent_and_tilde", &[RightShift])),
        ("u", Send("7", &[LeftShift])),
        ("i", Send("9", &[LeftShift])),
        ("o", Send("0", &[LeftShift])),
        ("p", Send("hyphen", &[LeftShift])),
        ("open_bracket", Block),
        ("close_bracket", Block),
        ("backslash", Block),
        ("h", to("grave_accent_and_tilde")),
        ("j", Send("backslash", &[LeftShift])),
        ("k", Send("open_bracket", &[LeftShift])),
        ("l", Send("close_bracket", &[LeftShift])),
        ("semicolon", Send("slash", &[LeftShift])),
        ("quote", Block),
        ("return_or_enter", Block),
        ("n", Send("2", &[RightShift])),
        ("m", Send("spacebar", &[LeftControl, LeftCommand])),
        ("comma", to("open_bracket")),
        ("period", to("close_bracket")),
        ("slash", Send("4", &[RightShift])),
        ("right_shift", Block),
    ])?;
    Ok(table.into_rules())
}
