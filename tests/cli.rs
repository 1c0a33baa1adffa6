use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const CHARACTERS: &str = "\
Id,FirstName,LastName,Description,Race,Comment
1,Bilbo,Baggins,Finder of the Ring,Hobbit,
2,Frodo,Baggins,Ring-bearer,Hobbit,Nephew
";

fn tablescript() -> Command {
    Command::cargo_bin("tablescript").unwrap()
}

#[test]
fn summary_to_stdout() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("character.csv");
    fs::write(&input, CHARACTERS).unwrap();

    tablescript()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1 tables\n"))
        .stdout(predicate::str::contains("CHARACTER: 2 rows, 6 columns"))
        .stdout(predicate::str::contains("        FirstName = Frodo"));
}

#[test]
fn character_template_writes_basil_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("character.csv");
    let out = dir.path().join("out");
    fs::write(&input, CHARACTERS).unwrap();

    tablescript()
        .arg(&input)
        .args(["--template", "character", "--output"])
        .arg(&out)
        .assert()
        .success();

    let text = fs::read_to_string(out.join("character.bd")).unwrap();
    assert!(text.starts_with(
        "CHARACTER\n\n    Id Slug FirstName LastName Description Race Comment\n"
    ));
    assert!(text.contains(
        "\n        %frodo-baggins-character\n             ~ frodo-baggins-character\n"
    ));
    assert!(text.ends_with("             ~ Ring-bearer\n             ~ Nephew\n"));
}

#[test]
fn tera_template_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("character.csv");
    let template = dir.path().join("names.txt.tera");
    fs::write(&input, CHARACTERS).unwrap();
    fs::write(
        &template,
        concat!(
            "{% for table in schema.tables %}{% for row in table.rows %}",
            "{{ row.values.FirstName | snake_case }}>{{ row.next.FirstName }}\n",
            "{% endfor %}{% endfor %}"
        ),
    )
    .unwrap();

    tablescript()
        .arg(&input)
        .arg("--template")
        .arg(&template)
        .assert()
        .success()
        .stdout("bilbo>Frodo\nfrodo>\n");
}

#[test]
fn strict_mode_rejects_ragged_rows() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("race.csv");
    fs::write(&input, "Name\nHobbit\nElf,extra\n").unwrap();

    tablescript().arg(&input).assert().success();

    tablescript()
        .arg(&input)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected columns [Name], found [Name, Column2]"));
}

#[test]
fn unsupported_input_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("notes.md");
    fs::write(&input, "# notes").unwrap();

    tablescript()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format: md"));
}
