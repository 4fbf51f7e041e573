//! Text shown on the status display.

use core::fmt;

use crate::controller::diagnostics::Diagnostics;
use crate::controller::wall_follower::ControllerType;

// serial terminals need the carriage return
const EOL: &str = "\r\n";

pub struct MainMenu;
impl fmt::Display for MainMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "left = {}{}", ControllerType::BangBang.menu_label(), EOL)?;
        write!(f, "right = {}{}", ControllerType::PType.menu_label(), EOL)
    }
}

/// One frame of the status screen, rendered from the shared diagnostics.
pub struct Status<'a> {
    pub controller_type: ControllerType,
    pub diagnostics: &'a Diagnostics,
}
impl<'a> fmt::Display for Status<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Controller Type is... {}", EOL)?;
        write!(f, "{}{}", self.controller_type.name(), EOL)?;
        write!(f, "US Distance: {}{}", self.diagnostics.distance_cm(), EOL)?;
        write!(f, "Dist Error: {}{}", self.diagnostics.error_cm(), EOL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_lists_both_controllers() {
        let text = format!("{}", MainMenu);
        assert_eq!(text, "left = bangbang\r\nright = p type\r\n");
    }

    #[test]
    fn status_reports_latest_diagnostics() {
        let diagnostics = Diagnostics::new();
        diagnostics.publish_distance(27);
        diagnostics.publish_error(3);
        let status = Status {
            controller_type: ControllerType::PType,
            diagnostics: &diagnostics,
        };
        let text = format!("{}", status);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            ["Controller Type is... ", "PType", "US Distance: 27", "Dist Error: 3"]
        );
    }
}
