use std::fs;
use std::process::Command;
use tempfile::tempdir;

const SCHEMA: &str = r#"
-- PostgreSQL database dump
CREATE TABLE public.authors (
    id integer NOT NULL,
    name text NOT NULL
);

CREATE TABLE public.books (
    id integer NOT NULL,
    author_id integer,
    isbn character varying(13) NOT NULL
);

ALTER TABLE ONLY public.authors
    ADD CONSTRAINT authors_pkey PRIMARY KEY (id);

ALTER TABLE ONLY public.books
    ADD CONSTRAINT books_author_id_fkey FOREIGN KEY (author_id) REFERENCES public.authors(id);

CREATE UNIQUE INDEX books_isbn_key ON public.books USING btree (isbn);
"#;

fn sql2drawio() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sql2drawio"))
}

#[test]
fn test_converts_schema_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("schema.sql");
    let output = dir.path().join("schema.drawio");
    fs::write(&input, SCHEMA).unwrap();

    let status = sql2drawio()
        .arg("--input-path")
        .arg(&input)
        .arg("--output-path")
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());

    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.contains(r#"value="authors""#));
    assert!(xml.contains(r#"value="books""#));
    assert!(xml.contains(r#"value="UQ""#));
    assert!(xml.contains(r#"value="0..N""#));
    assert!(xml.contains(r#"value="0..1""#));
    assert!(xml.contains(r#"value="character varying(13)""#));
}

#[test]
fn test_underscore_aliases() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.sql");
    let output = dir.path().join("out.drawio");
    fs::write(&input, SCHEMA).unwrap();

    let status = sql2drawio()
        .arg("--input_path")
        .arg(&input)
        .arg("--output_path")
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());
    assert!(output.exists());
}

#[test]
fn test_no_tables_is_a_warning() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("empty.sql");
    let output = dir.path().join("empty.drawio");
    fs::write(&input, "SELECT 1;").unwrap();

    let result = sql2drawio()
        .args(["--log-level", "warn", "-i", input.to_str().unwrap(), "-o", output.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(result.status.success());
    assert!(!output.exists());
    assert!(String::from_utf8_lossy(&result.stderr).contains("No tables found"));
}

#[test]
fn test_no_tables_warning_survives_error_log_level() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("empty.sql");
    let output = dir.path().join("empty.drawio");
    fs::write(&input, "-- nothing here\nSELECT 1;").unwrap();

    let result = sql2drawio()
        .args(["--log-level", "error", "-i", input.to_str().unwrap(), "-o", output.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(result.status.success());
    assert!(!output.exists());
    assert!(String::from_utf8_lossy(&result.stderr).contains("No tables found"));
}

#[test]
fn test_missing_input_fails() {
    let dir = tempdir().unwrap();
    let result = sql2drawio()
        .arg("-i")
        .arg(dir.path().join("nope.sql"))
        .arg("-o")
        .arg(dir.path().join("out.drawio"))
        .output()
        .unwrap();
    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("Failed to read"));
}

#[test]
fn test_invalid_utf8_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.sql");
    fs::write(&input, [0xff, 0xfe, 0x00, 0x43]).unwrap();
    let status = sql2drawio()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("out.drawio"))
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(1));
}
