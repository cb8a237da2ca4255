use doicite_core::builtin_styles;

use crate::ProcessExit;

pub(crate) fn run_styles_command() -> ProcessExit {
    let styles = builtin_styles();
    let default = styles.default_style_name();
    for name in styles.names() {
        if name == default {
            println!("{name} (default)");
        } else {
            println!("{name}");
        }
    }
    ProcessExit::Success
}
