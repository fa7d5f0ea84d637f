use banlist_tools::extra_deck::ExtraDeckTargets;
use banlist_tools::{
    add_extra_deck_cards, apply_banlist, extract_ids, remove_duplicates, remove_extra_deck,
    ToolError,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use ygo_common::{CardDataFile, CardId, Resolver};

// Test fixtures

fn card_data() -> CardDataFile {
    CardDataFile::from_json(
        "cardData.json",
        r#"[
            {"name": "Dark Magician", "id": 46986414},
            {"name": "Pot of Greed", "id": "55144522"},
            {"name": "Raigeki", "id": 12580477},
            {"name": "Thousand-Eyes Restrict", "id": 63519819},
            {"name": "Gatling Dragon", "id": 87751584}
        ]"#,
    )
    .unwrap()
}

fn offline_resolver() -> Resolver {
    Resolver::new().with_local(card_data())
}

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

// apply-banlist

#[test]
fn test_apply_banlist_sets_tiers_and_defaults_to_unlimited() {
    let dir = TempDir::new().unwrap();
    let banlist = write(
        dir.path(),
        "Banlist.txt",
        "Monster\tEffect\tDark Magician\tSemi-Limited\n\
Spell\tNormal\tPot of Greed\tForbidden\n\
short\tline\n",
    );
    let conf = write(
        dir.path(),
        "OnlyRedCards.conf",
        "#[Goat Format]\n\
46986414 1 # Dark Magician,\n\
55144522 3 # Pot of Greed,\n\
12580477 0 # Raigeki,\n",
    );

    let updates = apply_banlist(&banlist, &[conf.clone()]).unwrap();

    assert_eq!(
        read(&conf),
        "#[Goat Format]\n\
46986414 2 # Dark Magician,\n\
55144522 0 # Pot of Greed,\n\
12580477 3 # Raigeki,\n"
    );
    assert_eq!(updates[0].entries, 3);
    assert_eq!(updates[0].changed, 3);
    assert_eq!(updates[0].unlisted, 1);
}

#[test]
fn test_apply_banlist_missing_banlist_is_an_error() {
    let dir = TempDir::new().unwrap();
    let conf = write(dir.path(), "OnlyRedCards.conf", "46986414 1 # Dark Magician,\n");

    let result = apply_banlist(&dir.path().join("Banlist.txt"), &[conf.clone()]);

    assert!(matches!(result, Err(ToolError::MissingInput(_))));
    assert_eq!(read(&conf), "46986414 1 # Dark Magician,\n");
}

// dedupe

#[test]
fn test_remove_duplicates_drops_ids_present_in_keep_list() {
    let dir = TempDir::new().unwrap();
    let keep = write(
        dir.path(),
        "OnlyBlueCards.conf",
        "46986414 1 # Dark Magician,\n",
    );
    let from = write(
        dir.path(),
        "OnlyWhiteCards.conf",
        "!Custom\n\
46986414 1 # Dark Magician,\n\
12580477 1 # Raigeki,\n",
    );

    let removed = remove_duplicates(&keep, &from).unwrap();

    assert_eq!(removed, 1);
    assert_eq!(read(&from), "!Custom\n12580477 1 # Raigeki,\n");
}

#[test]
fn test_remove_duplicates_keeps_untouched_lines_verbatim() {
    let dir = TempDir::new().unwrap();
    let keep = write(dir.path(), "OnlyBlueCards.conf", "46986414 1 # Dark Magician,\n");
    let from = write(
        dir.path(),
        "OnlyWhiteCards.conf",
        "12580477 1 # Raigeki, staple since 2005\n46986414 1 # Dark Magician,\n",
    );

    let removed = remove_duplicates(&keep, &from).unwrap();

    assert_eq!(removed, 1);
    assert_eq!(read(&from), "12580477 1 # Raigeki, staple since 2005\n");
}

#[test]
fn test_remove_duplicates_with_missing_keep_list_removes_nothing() {
    let dir = TempDir::new().unwrap();
    let from = write(dir.path(), "OnlyWhiteCards.conf", "12580477 1 # Raigeki,\n");

    let removed = remove_duplicates(&dir.path().join("OnlyBlueCards.conf"), &from).unwrap();

    assert_eq!(removed, 0);
    assert_eq!(read(&from), "12580477 1 # Raigeki,\n");
}

#[test]
fn test_remove_duplicates_requires_from_list() {
    let dir = TempDir::new().unwrap();
    let keep = write(dir.path(), "OnlyBlueCards.conf", "");

    let result = remove_duplicates(&keep, &dir.path().join("OnlyWhiteCards.conf"));

    assert!(matches!(result, Err(ToolError::MissingInput(_))));
}

// extract-ids

#[test]
fn test_extract_ids_writes_conf_next_to_input_and_reports_misses() {
    let dir = TempDir::new().unwrap();
    let input = write(
        dir.path(),
        "OnlyRedCards.txt",
        "Dark Magician (Manga)\n\nPot of Greed\nNot A Real Card\n",
    );
    let report = dir.path().join("cards_not_found.txt");
    let absent = dir.path().join("OnlyBlueCards.txt");

    let summary = extract_ids(&[input, absent.clone()], &report, &offline_resolver()).unwrap();

    assert_eq!(
        read(&dir.path().join("OnlyRedCards.conf")),
        "46986414 1 # Dark Magician (Manga),\n\
55144522 1 # Pot of Greed,\n"
    );
    assert_eq!(summary.skipped, vec![absent]);
    assert_eq!(summary.report.as_deref(), Some(report.as_path()));
    assert_eq!(read(&report), "Not A Real Card\n");
}

#[test]
fn test_extract_ids_rejects_input_that_is_already_a_conf() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "OnlyRedCards.conf", "Raigeki\n");
    let report = dir.path().join("cards_not_found.txt");

    let result = extract_ids(&[input.clone()], &report, &offline_resolver());

    assert!(matches!(result, Err(ToolError::InvalidInput(_))));
    assert_eq!(read(&input), "Raigeki\n");
}

#[test]
fn test_extract_ids_without_misses_writes_no_report() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "OnlyBlueCards.txt", "Raigeki\n");
    let report = dir.path().join("cards_not_found.txt");

    let summary = extract_ids(&[input], &report, &offline_resolver()).unwrap();

    assert!(summary.report.is_none());
    assert!(!report.exists());
    assert_eq!(summary.outcomes[0].written, 1);
}

// add-extra-deck

#[test]
fn test_add_extra_deck_cards_appends_per_tier_and_creates_lists() {
    let dir = TempDir::new().unwrap();
    let banlist = write(
        dir.path(),
        "ExtraDeckBanlist.txt",
        "Tier B Cards\n\
Thousand-Eyes Restrict\n\
Tier C Cards\n\
Gatling Dragon\n\
Mystery Fusion\n\
Tier D Cards\n",
    );
    let targets = ExtraDeckTargets {
        tier_b: write(
            dir.path(),
            "OnlyBlueCards.conf",
            "63519819 1 # Thousand-Eyes Restrict,\n",
        ),
        tier_c: dir.path().join("OnlyRedCards.conf"),
        tier_d: dir.path().join("OnlyWhiteCards.conf"),
    };
    let placeholder = CardId::parse("00000000").unwrap();

    let results =
        add_extra_deck_cards(&banlist, &targets, &offline_resolver(), &placeholder).unwrap();

    let appended: Vec<usize> = results.iter().map(|(_, n)| *n).collect();
    assert_eq!(appended, vec![0, 2, 0]);
    assert_eq!(
        read(&targets.tier_c),
        "87751584 1 # Gatling Dragon,\n00000000 1 # Mystery Fusion,\n"
    );
    assert_eq!(read(&targets.tier_d), "");
}

// remove-extra-deck

#[test]
fn test_remove_extra_deck_writes_filtered_copies() {
    let dir = TempDir::new().unwrap();
    let extra = write(dir.path(), "ExtraDeck.txt", "Gatling Dragon\nUnknown Synchro\n");
    let conf = write(
        dir.path(),
        "OnlyRedCards.conf",
        "#[Goat Format]\n\
87751584 1 # Gatling Dragon,\n\
12580477 1 # Raigeki,\n",
    );

    let results = remove_extra_deck(&extra, &card_data(), &[conf.clone()]).unwrap();

    let filtered = dir.path().join("OnlyRedCards_filtered.conf");
    assert_eq!(results, vec![(filtered.clone(), 1)]);
    assert_eq!(read(&filtered), "#[Goat Format]\n12580477 1 # Raigeki,\n");
    // the source list is untouched
    assert!(read(&conf).contains("Gatling Dragon"));
}
