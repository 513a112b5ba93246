use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn tidegauge() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin("tidegauge"))
}

fn completion_script(shell: &str) -> String {
    let output = tidegauge()
        .args(["completion", "--shell", shell])
        .output()
        .unwrap();
    assert!(output.status.success(), "completion for {} failed", shell);
    String::from_utf8(output.stdout).unwrap()
}

/// Both analysis subcommands and their tuning flags are completable
#[test]
fn test_bash_completes_subcommands_and_flags() {
    let script = completion_script("bash");

    assert!(script.contains("complete -F _tidegauge"));
    for word in ["workers", "server", "--source", "--sentinel", "--window", "--time-field"] {
        assert!(script.contains(word), "bash script lacks {}", word);
    }
    assert!(script.contains("pretty json table"));
}

#[test]
fn test_fish_completes_server_options() {
    let script = completion_script("fish");

    for flag in ["-l sentinel", "-l message-field", "-l window", "-l series"] {
        assert!(script.contains(flag), "fish script lacks {}", flag);
    }
    assert!(script.contains("-l workers"));
}

#[test]
fn test_zsh_script_names_binary() {
    let script = completion_script("zsh");

    assert!(script.starts_with("#compdef tidegauge"));
    assert!(script.contains("--window"));
}

#[test]
fn test_completion_help_shows_install_paths() {
    tidegauge()
        .args(["completion", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_tidegauge"))
        .stdout(predicate::str::contains("completions/tidegauge.fish"));
}

#[test]
fn test_main_help_lists_commands() {
    tidegauge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("workers"))
        .stdout(predicate::str::contains("server"))
        .stdout(predicate::str::contains("LABEL=FILE"));
}
