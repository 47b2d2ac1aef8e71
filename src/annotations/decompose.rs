use crate::annotations::types::CodeLevels;

/// Derives the four nested prefix levels used as the sunburst path.
pub fn code_levels(code: &str) -> CodeLevels {
    CodeLevels {
        l1: prefix(code, 1),
        l2: prefix(code, 2),
        l3: prefix(code, 3),
        l5: prefix(code, 5),
    }
}

fn prefix(code: &str, len: usize) -> String {
    code.chars().take(len).collect()
}
