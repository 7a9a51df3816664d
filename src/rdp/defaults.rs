//! Fixed default settings written into freshly generated files

use crate::rdp::directive::DirectiveType::{Integer as I, String as S};
use crate::rdp::directive::{Directive, DirectiveType};

pub const SCREEN_MODE_ID: &str = "screen mode id";
pub const USE_MULTIMON: &str = "use multimon";
pub const SELECTED_MONITORS: &str = "selectedmonitors";

/// Full-screen mode, required for spanning several monitors
pub const SCREEN_MODE_FULL: i64 = 2;

/// Settings emitted after the display directives, in file order
pub const DEFAULT_DIRECTIVES: &[(&str, DirectiveType, &str)] = &[
    ("desktopwidth", I, "1920"),
    ("desktopheight", I, "1080"),
    ("session bpp", I, "32"),
    // 3 in the second field lets the window be maximized
    ("winposstr", S, "0,3,0,0,800,600"),
    ("compression", I, "1"),
    ("keyboardhook", I, "2"),
    ("audiocapturemode", I, "0"),
    ("videoplaybackmode", I, "1"),
    ("connection type", I, "7"),
    ("networkautodetect", I, "1"),
    ("bandwidthautodetect", I, "1"),
    ("displayconnectionbar", I, "1"),
    ("enableworkspacereconnect", I, "0"),
    ("disable wallpaper", I, "0"),
    ("allow font smoothing", I, "1"),
    ("allow desktop composition", I, "1"),
    ("disable full window drag", I, "0"),
    ("disable menu anims", I, "0"),
    ("disable themes", I, "0"),
    ("disable cursor setting", I, "0"),
    ("bitmapcachepersistenable", I, "1"),
    ("audiomode", I, "0"),
    ("redirectprinters", I, "1"),
    ("redirectcomports", I, "0"),
    ("redirectsmartcards", I, "1"),
    ("redirectclipboard", I, "1"),
    ("redirectposdevices", I, "0"),
    ("redirectdirectx", I, "1"),
    ("autoreconnection enabled", I, "1"),
    ("authentication level", I, "2"),
    ("prompt for credentials", I, "0"),
    ("negotiate security layer", I, "1"),
    ("remoteapplicationmode", I, "0"),
    ("alternate shell", S, ""),
    ("shell working directory", S, ""),
    ("gatewayhostname", S, ""),
    ("gatewayusagemethod", I, "4"),
    ("gatewaycredentialssource", I, "4"),
    ("gatewayprofileusagemethod", I, "0"),
    ("promptcredentialonce", I, "0"),
    ("use redirection server name", I, "0"),
];

/// Builds the `selectedmonitors` directive for indices in the given order
pub fn selected_monitors_directive(indices: &[usize]) -> Directive {
    let value = indices
        .iter()
        .map(|index| index.to_string())
        .collect::<Vec<_>>()
        .join(",");
    Directive::new(SELECTED_MONITORS, DirectiveType::String, value)
}

/// `use multimon:i:1`
pub fn multimon_enabled_directive() -> Directive {
    Directive::integer(USE_MULTIMON, 1)
}

/// Every directive of a freshly generated file, in file order
pub fn default_directives(indices: &[usize]) -> Vec<Directive> {
    let mut directives = Vec::with_capacity(DEFAULT_DIRECTIVES.len() + 3);
    directives.push(Directive::integer(SCREEN_MODE_ID, SCREEN_MODE_FULL));
    directives.push(multimon_enabled_directive());
    directives.push(selected_monitors_directive(indices));
    directives.extend(
        DEFAULT_DIRECTIVES
            .iter()
            .map(|(key, kind, value)| Directive::new(*key, *kind, *value)),
    );
    directives
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn display_directives_come_first() {
        let directives = default_directives(&[1, 3]);
        let lines: Vec<String> = directives.iter().map(Directive::to_string).collect();

        assert_eq!(lines[0], "screen mode id:i:2");
        assert_eq!(lines[1], "use multimon:i:1");
        assert_eq!(lines[2], "selectedmonitors:s:1,3");
        assert_eq!(lines.len(), DEFAULT_DIRECTIVES.len() + 3);
    }

    #[test]
    fn static_block_has_unique_keys_and_no_display_directives() {
        let keys: HashSet<&str> = DEFAULT_DIRECTIVES.iter().map(|(key, _, _)| *key).collect();
        assert_eq!(keys.len(), DEFAULT_DIRECTIVES.len());
        assert!(!keys.contains(SCREEN_MODE_ID));
        assert!(!keys.contains(USE_MULTIMON));
        assert!(!keys.contains(SELECTED_MONITORS));
    }

    #[test]
    fn selection_value_keeps_given_order() {
        assert_eq!(
            selected_monitors_directive(&[2, 0]).to_string(),
            "selectedmonitors:s:2,0"
        );
        assert_eq!(selected_monitors_directive(&[]).to_string(), "selectedmonitors:s:");
    }
}
