use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn script_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kakeibo_cli").unwrap();
    cmd.env("KAKEIBO_CLI_SCRIPT", "1")
        .env("KAKEIBO_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("KAKEIBO_TEST_CONFIRMATIONS")
        .env_remove("KAKEIBO_TEST_TEXT_INPUTS");
    cmd
}

#[test]
fn empty_log_shows_placeholder() {
    let home = TempDir::new().unwrap();
    script_cmd(&home)
        .write_stdin("expense list\nexit\n")
        .assert()
        .success()
        .stdout(contains("支出データがありません"));
}

#[test]
fn submitted_expense_appears_in_table() {
    let home = TempDir::new().unwrap();
    let input = "\
expense set date 2024-01-01
expense set main 食費
expense set sub 外食
expense set amount 1500
expense set memo lunch
expense submit
expense list
exit
";
    script_cmd(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("日付"))
        .stdout(contains("カテゴリー"))
        .stdout(contains("食費 / 外食"))
        .stdout(contains("¥1,500"))
        .stdout(contains("現金"));
}

#[test]
fn export_prints_json_log() {
    let home = TempDir::new().unwrap();
    let input = "\
expense set date 2024-02-10
expense set main 交通費
expense set sub 電車
expense set amount 220
expense set payment e-money
expense submit
expense export
";
    script_cmd(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("\"main_category\": \"交通費\""))
        .stdout(contains("\"payment_method\": \"電子マネー\""))
        .stdout(contains("\"amount\": 220"));
}

#[test]
fn incomplete_draft_is_refused() {
    let home = TempDir::new().unwrap();
    script_cmd(&home)
        .write_stdin("expense set main 食費\nexpense submit\nexpense list\n")
        .assert()
        .success()
        .stdout(contains("Cannot submit expense"))
        .stdout(contains("支出データがありません"));
}

#[test]
fn delete_follows_scripted_confirmation() {
    let home = TempDir::new().unwrap();
    script_cmd(&home)
        .env("KAKEIBO_TEST_CONFIRMATIONS", "no|yes")
        .write_stdin("category delete 1\ncategory delete 4 2\ncategory list\n")
        .assert()
        .success()
        .stdout(contains("「食費」とそのすべての中分類を削除してもよろしいですか？ no"))
        .stdout(contains("「娯楽費」の「旅行」を削除してもよろしいですか？ yes"))
        .stdout(contains("Deleted 「旅行」."))
        .stdout(contains("4.2 スポーツ"));
}

#[test]
fn delete_without_answers_declines() {
    let home = TempDir::new().unwrap();
    script_cmd(&home)
        .write_stdin("category delete 3\ncategory list\n")
        .assert()
        .success()
        .stdout(contains("Deletion cancelled."))
        .stdout(contains("3. 交通費"));
}

#[test]
fn rename_through_edit_commands() {
    let home = TempDir::new().unwrap();
    let input = "\
category edit 1 2
category input ランチ
category commit
category list
";
    script_cmd(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Renamed `外食` to `ランチ`."))
        .stdout(contains("1.2 ランチ"));
}

#[test]
fn wizard_runs_from_scripted_answers() {
    let home = TempDir::new().unwrap();
    script_cmd(&home)
        .env(
            "KAKEIBO_TEST_TEXT_INPUTS",
            "<KEEP>|住居費|光熱費|クレジットカード|8200|電気|Save",
        )
        .write_stdin("expense add\nexpense list\n")
        .assert()
        .success()
        .stdout(contains("住居費 / 光熱費"))
        .stdout(contains("¥8,200"))
        .stdout(contains("クレジットカード"));
}

#[test]
fn wizard_needs_terminal_without_script_answers() {
    let home = TempDir::new().unwrap();
    script_cmd(&home)
        .write_stdin("expense add\n")
        .assert()
        .success()
        .stdout(contains("needs a terminal"));
}

#[test]
fn unknown_command_gets_suggestion() {
    let home = TempDir::new().unwrap();
    script_cmd(&home)
        .write_stdin("expnse list\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `expnse`"))
        .stdout(contains("Suggestion: `expense`?"));
}

#[test]
fn config_set_persists_between_runs() {
    let home = TempDir::new().unwrap();
    script_cmd(&home)
        .write_stdin("config set currency_symbol 円\n")
        .assert()
        .success();

    let stored = std::fs::read_to_string(home.path().join("config.json")).unwrap();
    assert!(stored.contains("円"));

    let input = "\
expense set main 娯楽費
expense set sub 映画
expense set amount 1800
expense submit
expense list
";
    script_cmd(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("円1,800"))
        .stdout(contains("¥").not());
}

#[test]
fn screen_reader_mode_spells_amounts() {
    let home = TempDir::new().unwrap();
    let input = "\
config set screen_reader_mode on
expense set main 食費
expense set sub カフェ
expense set amount 480
expense submit
expense list
";
    script_cmd(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("480 yen"))
        .stdout(contains("SUCCESS:"));
}
