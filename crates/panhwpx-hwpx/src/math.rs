//! LaTeX to HWP equation script
//!
//! Hangul's equation editor uses its own script language (`{a} over {b}`,
//! `sum from{0} to{n}`, ...). Only a small LaTeX subset is rewritten; any
//! other input passes through with its command backslashes removed.
//!
//! The rules run in a fixed order and each is applied to every occurrence
//! in a single pass. Later rules see the output of earlier ones.

use std::sync::OnceLock;

use regex::Regex;

/// Symbol commands with a dedicated script spelling
const SYMBOLS: &[(&str, &str)] = &[
    (r"\geq", ">="),
    (r"\leq", "<="),
    (r"\times", "times"),
    (r"\cdot", "cdot"),
    (r"\infty", "inf"),
    (r"\pm", "+-"),
];

struct Rules {
    frac: Regex,
    sum: Regex,
    int: Regex,
    sqrt: Regex,
    command: Regex,
}

fn rules() -> &'static Rules {
    static RULES: OnceLock<Rules> = OnceLock::new();
    RULES.get_or_init(|| Rules {
        frac: Regex::new(r"\\frac\{([^}]*)\}\{([^}]*)\}").unwrap(),
        sum: Regex::new(r"\\sum_\{([^}]*)\}\^\{([^}]*)\}").unwrap(),
        int: Regex::new(r"\\int_\{([^}]*)\}\^\{([^}]*)\}").unwrap(),
        sqrt: Regex::new(r"\\sqrt\{([^}]*)\}").unwrap(),
        command: Regex::new(r"\\([a-zA-Z]+)").unwrap(),
    })
}

/// Convert LaTeX math source to HWP equation script
pub fn latex_to_hwp_script(latex: &str) -> String {
    let rules = rules();
    let s = latex.trim().trim_matches('$');

    let s = rules.frac.replace_all(s, "{${1}} over {${2}}");
    let s = rules.sum.replace_all(&s, "sum from{${1}} to{${2}}");
    let s = rules.int.replace_all(&s, "int from{${1}} to{${2}}");
    let s = rules.sqrt.replace_all(&s, "sqrt{${1}}");

    let mut s = s.replace(r"\left(", "left(").replace(r"\right)", "right)");
    for (command, spelling) in SYMBOLS {
        s = s.replace(command, spelling);
    }

    rules.command.replace_all(&s, "${1}").into_owned()
}
