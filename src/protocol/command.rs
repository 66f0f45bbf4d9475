//! Egress command formatting.
//!
//! Renders a chosen joint action as engine commands, one per acting unit:
//! `move <unit> <direction>` or `attack <unit> <target>`, joined with
//! " ; " on a single line.

use crate::board::{JointAction, UnitAction};

/// Formats a joint action as a " ; "-separated command list in entry order.
/// An empty joint action formats as "-".
pub fn format_commands(joint: &JointAction) -> String {
    if joint.is_empty() {
        return "-".to_string();
    }
    joint
        .entries()
        .iter()
        .map(|&(id, action)| match action {
            UnitAction::Move(direction) => format!("move {id} {direction}"),
            UnitAction::Attack(target) => format!("attack {id} {target}"),
        })
        .collect::<Vec<_>>()
        .join(" ; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Direction;

    #[test]
    fn formats_moves_and_attacks() {
        let joint = JointAction::new(vec![
            (1, UnitAction::Move(Direction::North)),
            (2, UnitAction::Attack(7)),
        ]);
        assert_eq!(format_commands(&joint), "move 1 north ; attack 2 7");
    }

    #[test]
    fn empty_joint_action_formats_as_dash() {
        assert_eq!(format_commands(&JointAction::new(Vec::new())), "-");
    }
}
