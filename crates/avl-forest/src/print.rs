//! Box-drawing tree dump helper.

/// Renders one child subtree given the indentation prefix for its lines.
pub type PrintChild<'a> = dyn Fn(&str) -> String + 'a;

/// Renders `children` below a parent line, one branch per child.
///
/// Trailing `None` children are dropped; inner `None`s are skipped without
/// shifting the branch shapes of their siblings.
pub fn print_tree(tab: Option<&str>, children: &[Option<&PrintChild<'_>>]) -> String {
    let tab = tab.unwrap_or("");
    let mut out = String::new();

    let Some(last) = children.iter().rposition(Option::is_some) else {
        return out;
    };

    for (i, child_opt) in children.iter().enumerate().take(last + 1) {
        let Some(child_fn) = *child_opt else {
            continue;
        };

        let is_last = i == last;
        let child_tab = format!("{tab}{}  ", if is_last { " " } else { "│" });
        let child = child_fn(&child_tab);
        let branch = if child.is_empty() {
            "│"
        } else if is_last {
            "└─"
        } else {
            "├─"
        };

        out.push('\n');
        out.push_str(tab);
        out.push_str(branch);
        if !child.is_empty() {
            out.push(' ');
            out.push_str(&child);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_children_render_nothing() {
        assert_eq!(print_tree(None, &[]), "");
        assert_eq!(print_tree(Some("  "), &[None, None]), "");
    }

    #[test]
    fn branches_and_nested_indent() {
        let leaf: &PrintChild<'_> = &|_tab: &str| "leaf".to_string();
        let nested: &PrintChild<'_> =
            &|tab: &str| format!("inner{}", print_tree(Some(tab), &[Some(leaf)]));
        let out = print_tree(None, &[Some(nested), Some(leaf)]);
        assert_eq!(out, "\n├─ inner\n│  └─ leaf\n└─ leaf");
    }
}
