//! Help text for the documented commands.

const HEADER: &str = "Documented commands (type help <topic>):";

/// `(command, usage)`, sorted by command name.
pub const TOPICS: &[(&str, &str)] = &[
    ("EOF", "EOF signal to exit the program."),
    (
        "all",
        "Usage: all or all <class> or <class>.all()\n\
         Display string representations of all instances of a given class.\n\
         If no class is specified, displays all instantiated objects.",
    ),
    (
        "count",
        "Usage: count <class> or <class>.count()\n\
         Retrieve the number of instances of a given class.",
    ),
    (
        "create",
        "Usage: create <class> [<key>=<value> ...]\n\
         Create a new class instance and print its id.",
    ),
    (
        "destroy",
        "Usage: destroy <class> <id> or <class>.destroy(<id>)\n\
         Delete a class instance of a given id.",
    ),
    (
        "help",
        "List available commands with \"help\" or detailed help with \"help cmd\".",
    ),
    ("quit", "Quit command to exit the program."),
    (
        "show",
        "Usage: show <class> <id> or <class>.show(<id>)\n\
         Display the string representation of a class instance of a given id.",
    ),
    (
        "update",
        "Usage: update <class> <id> <attribute_name> <attribute_value> or\n\
         \x20      <class>.update(<id>, <attribute_name>, <attribute_value>) or\n\
         \x20      <class>.update(<id>, <dictionary>)\n\
         Update a class instance of a given id by adding or updating\n\
         a given attribute key/value pair or dictionary.",
    ),
];

/// Usage text for one command.
pub fn topic(name: &str) -> Option<&'static str> {
    TOPICS
        .iter()
        .find(|(command, _)| *command == name)
        .map(|(_, usage)| *usage)
}

/// Listing printed by a bare `help`.
pub fn overview() -> String {
    let names: Vec<&str> = TOPICS.iter().map(|(command, _)| *command).collect();
    format!(
        "\n{HEADER}\n{}\n{}\n",
        "=".repeat(HEADER.len()),
        names.join("  ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_lists_every_topic() {
        let text = overview();
        assert!(text.contains("Documented commands (type help <topic>):"));
        assert!(text.contains("EOF  all  count  create  destroy  help  quit  show  update"));
    }

    #[test]
    fn topics_resolve_by_exact_name() {
        assert!(topic("update").unwrap().starts_with("Usage: update"));
        assert_eq!(topic("quit"), Some("Quit command to exit the program."));
        assert_eq!(topic("Update"), None);
    }
}
