use std::io::Cursor;
use std::path::PathBuf;

use hbnb_console::{Interpreter, Startup, repl, startup};
use hbnb_core::{AttrValue, models};
use hbnb_infra::{FileSnapshotStore, Storage};

/// A console process over a snapshot file in a temp directory.
struct TestSession {
    _dir: tempfile::TempDir,
    path: PathBuf,
}

impl TestSession {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.json");
        Self { _dir: dir, path }
    }

    fn interpreter(&self) -> (Interpreter<FileSnapshotStore, Vec<u8>>, Startup) {
        let registry = models::registry();
        let mut storage = Storage::new(FileSnapshotStore::new(&self.path));
        let startup = startup::load(&mut storage, &registry).unwrap();
        (Interpreter::new(storage, registry, Vec::new()), startup)
    }

    /// Start a process, feed it `script` on stdin, return stdout.
    fn run(&self, script: &str) -> String {
        let (mut interpreter, _) = self.interpreter();
        repl::run_script(&mut interpreter, Cursor::new(script.as_bytes())).unwrap();
        String::from_utf8(interpreter.into_output()).unwrap()
    }
}

fn lines(output: &str) -> Vec<&str> {
    output.lines().collect()
}

#[test]
fn create_then_show_in_a_later_process() {
    let session = TestSession::new();
    let out = session.run("create User\n");
    let id = lines(&out)[0].to_string();

    let out = session.run(&format!("show User {id}\nUser.show(\"{id}\")\n"));
    let shown = lines(&out);
    assert!(shown[0].starts_with(&format!("[User] ({id}) ")));
    assert_eq!(shown[0], shown[1]);
}

#[test]
fn end_of_input_prints_trailing_blank_line() {
    let session = TestSession::new();
    assert_eq!(session.run(""), "\n");
    assert_eq!(session.run("quit\ncreate User\n"), "");
}

#[test]
fn validation_ordering_messages() {
    let session = TestSession::new();
    let out = session.run("show City\nshow City 123\nshow Flight\nshow\n");
    assert_eq!(
        lines(&out),
        [
            "** instance id missing **",
            "** no instance found **",
            "** class doesn't exist **",
            "** class name missing **",
            "",
        ]
    );
}

#[test]
fn update_coerces_declared_numeric_attribute() {
    let session = TestSession::new();
    let id = lines(&session.run("create Place\n"))[0].to_string();
    session.run(&format!("update Place {id} number_rooms 4\n"));

    let (interpreter, startup) = session.interpreter();
    assert!(matches!(startup, Startup::Loaded(1)));
    let place = interpreter.storage().get(&format!("Place.{id}")).unwrap();
    assert_eq!(place.attribute("number_rooms"), Some(&AttrValue::Int(4)));
}

#[test]
fn both_syntaxes_list_identically() {
    let session = TestSession::new();
    session.run("create User\ncreate User\ncreate State\n");
    let out = session.run("all User\nUser.all()\n");
    let listed = lines(&out);
    assert_eq!(listed[0], listed[1]);
    assert_eq!(listed[0].matches("[User] (").count(), 2);
    assert!(!listed[0].contains("[State]"));
}

#[test]
fn count_matches_discriminator() {
    let session = TestSession::new();
    session.run("create Amenity\ncreate Amenity\ncreate Amenity\ncreate City\n");
    let out = session.run("Amenity.count()\ncount City\nReview.count()\n");
    assert_eq!(lines(&out), ["3", "1", "0", ""]);
}

#[test]
fn dictionary_update_through_dotted_call() {
    let session = TestSession::new();
    let id = lines(&session.run("create Place\n"))[0].to_string();
    session.run(&format!(
        "Place.update(\"{id}\", \
         {{\"max_guest\": \"6\", \"price_by_night\": 120, \"name\": \"Loft\"}})\n"
    ));

    let (interpreter, _) = session.interpreter();
    let place = interpreter.storage().get(&format!("Place.{id}")).unwrap();
    assert_eq!(place.attribute("max_guest"), Some(&AttrValue::Int(6)));
    assert_eq!(place.attribute("price_by_night"), Some(&AttrValue::Int(120)));
    assert_eq!(place.attribute("name"), Some(&AttrValue::Str("Loft".into())));
}

#[test]
fn destroy_persists_across_processes() {
    let session = TestSession::new();
    let id = lines(&session.run("create Review\n"))[0].to_string();
    session.run(&format!("destroy Review {id}\n"));
    let out = session.run(&format!("show Review {id}\ncount Review\n"));
    assert_eq!(lines(&out), ["** no instance found **", "0", ""]);
}

#[test]
fn create_with_parameters() {
    let session = TestSession::new();
    let out = session.run("create State name=\"California\"\n");
    let id = lines(&out)[0].to_string();
    let out = session.run(&format!("show State {id}\n"));
    assert!(lines(&out)[0].ends_with(", \"name\": \"California\"}"));
}

#[test]
fn rejected_literal_leaves_store_untouched() {
    let session = TestSession::new();
    let id = lines(&session.run("create User\n"))[0].to_string();
    let before = std::fs::read_to_string(&session.path).unwrap();

    let out = session.run(&format!("update User {id} {{\"email\": __import__}}\n"));
    assert!(lines(&out)[0].starts_with("** invalid literal"));
    assert_eq!(std::fs::read_to_string(&session.path).unwrap(), before);
}

#[test]
fn corrupt_snapshot_is_quarantined_on_startup() {
    let session = TestSession::new();
    std::fs::write(&session.path, "{ truncated").unwrap();

    let (interpreter, startup) = session.interpreter();
    match startup {
        Startup::Quarantined { moved_to, .. } => {
            let moved = moved_to.unwrap();
            assert_eq!(std::fs::read_to_string(moved).unwrap(), "{ truncated");
        }
        other => panic!("expected quarantine, got {other:?}"),
    }
    assert!(interpreter.storage().all().is_empty());
    assert!(!session.path.exists());

    let out = session.run("create User\ncount User\n");
    assert_eq!(lines(&out)[1], "1");
}

#[test]
fn unknown_syntax_is_not_fatal() {
    let session = TestSession::new();
    let out = session.run("User.fly()\nfoo\ncount User\n");
    assert_eq!(
        lines(&out),
        ["*** Unknown syntax: User.fly()", "*** Unknown syntax: foo", "0", ""]
    );
}
