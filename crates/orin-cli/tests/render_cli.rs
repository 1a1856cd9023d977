use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_render_header_argument() {
    cargo_bin_cmd!("orin")
        .args(["render", "# Title"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<h1>Title</h1>"));
}

#[test]
fn test_render_reads_stdin_when_no_argument() {
    cargo_bin_cmd!("orin")
        .arg("render")
        .write_stdin("**bold** and *italic*")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<strong>bold</strong> and <em>italic</em>",
        ));
}

#[test]
fn test_render_escapes_raw_html() {
    cargo_bin_cmd!("orin")
        .args(["render", "<script>alert(1)</script>"])
        .assert()
        .success()
        .stdout(predicate::str::contains("&lt;script&gt;"))
        .stdout(predicate::str::contains("<script>").not());
}

#[test]
fn test_render_groups_list_items() {
    cargo_bin_cmd!("orin")
        .arg("render")
        .write_stdin("- a\n- b\n- c")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<ul><li>a</li>\n<li>b</li>\n<li>c</li></ul>",
        ));
}

#[test]
fn test_render_seven_hashes_stays_literal() {
    cargo_bin_cmd!("orin")
        .args(["render", "####### TooDeep"])
        .assert()
        .success()
        .stdout(predicate::str::contains("####### TooDeep"));
}

#[test]
fn test_render_empty_stdin_prints_empty_line() {
    cargo_bin_cmd!("orin")
        .arg("render")
        .write_stdin("")
        .assert()
        .success()
        .stdout("\n");
}
