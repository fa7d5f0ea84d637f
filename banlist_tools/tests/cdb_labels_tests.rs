use banlist_tools::cdb_labels::{
    label_connection, label_databases, ListSets, OT_CUSTOM, OT_HIDDEN, OT_ILLEGAL, OT_TCG,
};
use banlist_tools::ToolError;
use rusqlite::{params, Connection};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// Test fixtures

fn create_cdb(path: &Path, ids: &[i64]) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE datas (id INTEGER PRIMARY KEY, ot INTEGER);
         CREATE TABLE texts (id INTEGER PRIMARY KEY, name TEXT);",
    )
    .unwrap();
    for id in ids {
        conn.execute("INSERT INTO datas (id, ot) VALUES (?1, 3)", params![id])
            .unwrap();
    }
}

fn ot_of(path: &Path, id: i64) -> i64 {
    let conn = Connection::open(path).unwrap();
    conn.query_row("SELECT ot FROM datas WHERE id = ?1", params![id], |row| row.get(0))
        .unwrap()
}

fn write_lists(dir: &Path) -> (PathBuf, PathBuf, PathBuf) {
    let red = dir.join("OnlyRedCards.conf");
    let blue = dir.join("OnlyBlueCards.conf");
    let white = dir.join("OnlyWhiteCards.conf");
    fs::write(&red, "55144522 0 # Pot of Greed,\n").unwrap();
    fs::write(&blue, "46986414 1 # Dark Magician,\n12580477 1 # Raigeki,\n").unwrap();
    fs::write(&white, "99999999 1 # Custom Card,\n").unwrap();
    (red, blue, white)
}

#[test]
fn test_label_databases_sets_ot_per_list_and_hides_the_rest() {
    let dir = TempDir::new().unwrap();
    let (red, blue, white) = write_lists(dir.path());
    let cdb = dir.path().join("cards.cdb");
    create_cdb(&cdb, &[55144522, 46986414, 12580477, 99999999, 11111111, 22222222]);

    let results = label_databases(&red, &blue, &white, &[cdb.clone()]).unwrap();

    assert_eq!(ot_of(&cdb, 55144522), OT_ILLEGAL);
    assert_eq!(ot_of(&cdb, 46986414), OT_TCG);
    assert_eq!(ot_of(&cdb, 12580477), OT_TCG);
    assert_eq!(ot_of(&cdb, 99999999), OT_CUSTOM);
    assert_eq!(ot_of(&cdb, 11111111), OT_HIDDEN);
    assert_eq!(ot_of(&cdb, 22222222), OT_HIDDEN);

    let (path, stats) = &results[0];
    assert_eq!(path, &cdb);
    assert_eq!(stats.hidden, 2);
    assert_eq!(stats.illegal, 1);
    assert_eq!(stats.tcg, 2);
    assert_eq!(stats.custom, 1);
}

#[test]
fn test_later_lists_win_when_an_id_is_listed_twice() {
    let dir = TempDir::new().unwrap();
    let cdb = dir.path().join("cards.cdb");
    create_cdb(&cdb, &[46986414]);

    let mut lists = ListSets::default();
    lists.red.insert("46986414".parse().unwrap());
    lists.white.insert("46986414".parse().unwrap());

    let mut conn = Connection::open(&cdb).unwrap();
    label_connection(&mut conn, &lists).unwrap();
    drop(conn);

    assert_eq!(ot_of(&cdb, 46986414), OT_CUSTOM);
}

#[test]
fn test_empty_lists_abort_before_touching_databases() {
    let dir = TempDir::new().unwrap();
    let cdb = dir.path().join("cards.cdb");
    create_cdb(&cdb, &[46986414]);
    let empty = dir.path().join("empty.conf");
    fs::write(&empty, "#[Goat Format]\n").unwrap();

    let result = label_databases(&empty, &empty, &empty, &[cdb.clone()]);

    assert!(matches!(result, Err(ToolError::InvalidInput(_))));
    assert_eq!(ot_of(&cdb, 46986414), 3);
}

#[test]
fn test_missing_and_broken_databases_do_not_stop_the_rest() {
    let dir = TempDir::new().unwrap();
    let (red, blue, white) = write_lists(dir.path());
    let missing = dir.path().join("missing.cdb");
    let broken = dir.path().join("broken.cdb");
    Connection::open(&broken)
        .unwrap()
        .execute_batch("CREATE TABLE other (id INTEGER);")
        .unwrap();
    let good = dir.path().join("cards.cdb");
    create_cdb(&good, &[46986414]);

    let results = label_databases(&red, &blue, &white, &[missing, broken, good.clone()]).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].0, good);
    assert_eq!(ot_of(&good, 46986414), OT_TCG);
}
