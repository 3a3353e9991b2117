use crate::CommandMeta;

/// Description body for one command's help page.
pub fn command_help_description(command: &CommandMeta) -> String {
    format!("{}\n\nUsage: `{}`", command.desc, command.usage)
}

pub fn unknown_category_message(category: &str, categories: &[&str]) -> String {
    format!(
        "Unknown category `{category}`. Available categories: {}.",
        categories
            .iter()
            .map(|name| format!("`{name}`"))
            .collect::<Vec<_>>()
            .join(", ")
    )
}

pub fn no_commands_message(category: Option<&str>) -> String {
    match category {
        Some(category) => format!("No commands found in `{category}`."),
        None => "No commands are registered.".to_owned(),
    }
}

pub fn page_out_of_range_message(requested: usize, total: usize) -> String {
    format!("Page {requested} does not exist. Available pages: 1-{total}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_description_includes_usage() {
        let meta = CommandMeta {
            name: "pages",
            desc: "Demo.",
            category: "utility",
            usage: "!pages [start]",
        };

        assert_eq!(
            command_help_description(&meta),
            "Demo.\n\nUsage: `!pages [start]`"
        );
    }

    #[test]
    fn unknown_category_lists_alternatives() {
        assert_eq!(
            unknown_category_message("fun", &["pagination", "utility"]),
            "Unknown category `fun`. Available categories: `pagination`, `utility`."
        );
    }
}
