//! Base layer and its shift-qualified overrides.
//!
//! ```text
//! TAB  q   w   e   r   t   y   u   i   o   p  BSP
//! ESC  a   s   d   f   g   h   j   k   l  RET
//! ___  z   x   c   v   b   n   m   ,   .  ___
//! ```

use super::table::{to, Binding, LayerTable};
use super::Tables;
use crate::layers::LayerId;
use crate::models::{Modifier, Rule};
use crate::rules::RuleResult;

use Binding::{Block, Pass};

/// Shifted keys whose meaning differs from "shift + base output".
pub(super) fn overrides(tables: &Tables<'_>) -> RuleResult<Vec<Rule>> {
    let mut table = LayerTable::new(tables.factory);
    table.bind_with(
        &[Modifier::Shift],
        &[
            ("open_bracket", to("delete_forward")),
            ("close_bracket", Block),
            ("backslash", Block),
            ("semicolon", Binding::Send("semicolon", &[Modifier::LeftShift])),
            ("quote", Block),
            ("return_or_enter", Block),
            ("slash", Binding::Send("slash", &[Modifier::LeftShift])),
            ("right_shift", Block),
        ],
    )?;
    Ok(table.into_rules())
}

/// Unconditional layer: letters pass through, thumb and pinky keys enter layers.
pub(super) fn base(tables: &Tables<'_>) -> RuleResult<Vec<Rule>> {
    let mut table = LayerTable::new(tables.factory);

    table.extend(tables.activator.enter(LayerId::SymbolRight)?);
    table.bind(&[
        ("q", Pass),
        ("w", Pass),
        ("e", Pass),
        ("r", Pass),
        ("t", Pass),
        ("y", Pass),
        ("u", Pass),
        ("i", Pass),
        ("o", Pass),
        ("p", Pass),
    ])?;
    table.extend(tables.activator.enter(LayerId::SymbolLeft)?);
    table.bind(&[("close_bracket", Block), ("backslash", Block)])?;
    table.extend(tables.activator.enter(LayerId::Number)?);
    table.bind(&[
        ("a", Pass),
        ("s", Pass),
        ("d", Pass),
        ("f", Pass),
        ("g", Pass),
        ("h", Pass),
        ("j", Pass),
        ("k", Pass),
        ("l", Pass),
    ])?;
    table.extend(tables.activator.enter(LayerId::Modifier)?);
    table.bind(&[
        ("quote", Block),
        ("return_or_enter", Block),
        ("z", Pass),
        ("x", Pass),
        ("c", Pass),
        ("v", Pass),
        ("b", Pass),
        ("n", Pass),
        ("m", Pass),
        ("comma", Pass),
        ("period", Pass),
        ("slash", to("right_shift")),
        ("right_shift", Block),
    ])?;

    Ok(table.into_rules())
}
