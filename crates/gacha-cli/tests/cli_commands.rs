//! Integration tests for the gacha CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A temp directory and the (not yet created) game directory inside it.
fn workspace() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let game = tmp.path().join("game");
    (tmp, game)
}

fn gacha(game: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gacha").unwrap();
    cmd.env("NO_COLOR", "1")
        .arg("--data-dir")
        .arg(game)
        .arg("--seed")
        .arg("42");
    cmd
}

/// A workspace with an initialised game.
fn new_game() -> (TempDir, PathBuf) {
    let (tmp, game) = workspace();
    gacha(&game).arg("init").assert().success();
    (tmp, game)
}

// ---------------------------------------------------------------------------
// init / status
// ---------------------------------------------------------------------------

#[test]
fn init_creates_game() {
    let (_tmp, game) = workspace();
    gacha(&game)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created game"))
        .stdout(predicate::str::contains("24 cards in the catalog"));
    assert!(game.join("all_cards.json").exists());
}

#[test]
fn init_refuses_existing_directory() {
    let (_tmp, game) = new_game();
    gacha(&game)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn status_requires_init() {
    let (_tmp, game) = workspace();
    gacha(&game)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("gacha init"));
}

#[test]
fn status_shows_starting_credits() {
    let (_tmp, game) = new_game();
    gacha(&game)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("5/99"))
        .stdout(predicate::str::contains("0/24"));
}

// ---------------------------------------------------------------------------
// draw
// ---------------------------------------------------------------------------

#[test]
fn draw_spends_credits() {
    let (_tmp, game) = new_game();
    gacha(&game)
        .args(["draw", "-n", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5 draw(s), 0 credit(s) left"));

    gacha(&game)
        .arg("draw")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no draw credits left"));
}

#[test]
fn draw_stops_when_credits_run_out() {
    let (_tmp, game) = new_game();
    gacha(&game)
        .args(["draw", "-n", "8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Out of credits."))
        .stdout(predicate::str::contains("5 draw(s)"));
}

#[test]
fn seeded_draws_are_reproducible() {
    let (_tmp_a, a) = new_game();
    let (_tmp_b, b) = new_game();
    let out_a = gacha(&a).args(["draw", "-n", "3"]).output().unwrap();
    let out_b = gacha(&b).args(["draw", "-n", "3"]).output().unwrap();
    assert!(out_a.status.success());
    assert_eq!(out_a.stdout, out_b.stdout);
}

// ---------------------------------------------------------------------------
// claim
// ---------------------------------------------------------------------------

#[test]
fn first_claim_starts_timer_then_cools_down() {
    let (_tmp, game) = new_game();
    gacha(&game)
        .arg("claim")
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily timer started"));

    gacha(&game)
        .arg("claim")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already claimed"));
}

// ---------------------------------------------------------------------------
// upgrade / evaluate / give / grant
// ---------------------------------------------------------------------------

#[test]
fn give_then_upgrade() {
    let (_tmp, game) = new_game();
    gacha(&game)
        .args(["give", "mc_01", "--count", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("now holding 4"));

    gacha(&game)
        .args(["evaluate", "mc_01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ready to upgrade"));

    gacha(&game)
        .args(["upgrade", "mc_01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Upgraded!"))
        .stdout(predicate::str::contains("Spent 4 copies, 0 left"));

    gacha(&game)
        .args(["evaluate", "mc_01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("needs 8 copies (0 held)"));
}

#[test]
fn upgrade_unowned_card_fails() {
    let (_tmp, game) = new_game();
    gacha(&game)
        .args(["upgrade", "space_01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not in the collection"));
}

#[test]
fn give_unknown_card_fails() {
    let (_tmp, game) = new_game();
    gacha(&game)
        .args(["give", "pirate_01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown card: pirate_01"));
}

#[test]
fn grant_is_capped() {
    let (_tmp, game) = new_game();
    gacha(&game)
        .args(["grant", "500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("balance 99"));
}

// ---------------------------------------------------------------------------
// cards / stats / simulate
// ---------------------------------------------------------------------------

#[test]
fn cards_filter_by_theme() {
    let (_tmp, game) = new_game();
    gacha(&game)
        .args(["cards", "--theme", "space"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saturn"))
        .stdout(predicate::str::contains("Creeper").not())
        .stdout(predicate::str::contains("8 cards"));
}

#[test]
fn cards_filter_by_current_rarity() {
    let (_tmp, game) = new_game();
    gacha(&game)
        .args(["give", "mc_01", "-c", "4"])
        .assert()
        .success();
    gacha(&game).args(["upgrade", "mc_01"]).assert().success();

    gacha(&game)
        .args(["cards", "--rarity", "rare", "--owned"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Creeper"))
        .stdout(predicate::str::contains("1 cards"));

    gacha(&game)
        .args(["cards", "--rarity", "legendary", "--owned"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No cards found."));
}

#[test]
fn cards_rejects_unknown_rarity() {
    let (_tmp, game) = new_game();
    gacha(&game)
        .args(["cards", "--rarity", "mythic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown rarity"));
}

#[test]
fn cards_search_is_case_insensitive() {
    let (_tmp, game) = new_game();
    gacha(&game)
        .args(["cards", "--search", "DRAGON"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ender Dragon"))
        .stdout(predicate::str::contains("Saturn").not());
}

#[test]
fn cards_upgradeable_lists_ready_cards_only() {
    let (_tmp, game) = new_game();
    gacha(&game)
        .args(["cards", "--upgradeable"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No cards found."));

    gacha(&game)
        .args(["give", "dino_02", "-c", "4"])
        .assert()
        .success();
    gacha(&game)
        .args(["give", "dino_03", "-c", "3"])
        .assert()
        .success();

    gacha(&game)
        .args(["cards", "--upgradeable"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dino_02"))
        .stdout(predicate::str::contains("dino_03").not())
        .stdout(predicate::str::contains("1 cards"));
}

#[test]
fn cards_owned_on_fresh_game_is_empty() {
    let (_tmp, game) = new_game();
    gacha(&game)
        .args(["cards", "--owned"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No cards found."));
}

#[test]
fn cards_rejects_unknown_theme() {
    let (_tmp, game) = new_game();
    gacha(&game)
        .args(["cards", "--theme", "pirates"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown theme"));
}

#[test]
fn stats_json() {
    let (_tmp, game) = new_game();
    gacha(&game)
        .args(["give", "dino_01", "-c", "2"])
        .assert()
        .success();
    gacha(&game)
        .args(["stats", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"totalCards\": 24"))
        .stdout(predicate::str::contains("\"ownedCards\": 1"));
}

#[test]
fn simulate_does_not_spend() {
    let (_tmp, game) = new_game();
    gacha(&game)
        .args(["simulate", "-n", "200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Legendary"));
    gacha(&game)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("5/99"));
}

// ---------------------------------------------------------------------------
// reset
// ---------------------------------------------------------------------------

#[test]
fn reset_needs_confirmation() {
    let (_tmp, game) = new_game();
    gacha(&game)
        .arg("reset")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn reset_restores_fresh_state() {
    let (_tmp, game) = new_game();
    gacha(&game).args(["draw", "-n", "2"]).assert().success();
    gacha(&game).args(["reset", "--yes"]).assert().success();
    gacha(&game)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("5/99"))
        .stdout(predicate::str::contains("0/24"));
}
