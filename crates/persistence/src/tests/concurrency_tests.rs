// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Multi-connection tests against a file database.
//!
//! Each writer owns its own connection, the way separate server processes
//! would, and the busy timeout makes them queue on the write lock.

use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use procura_domain::{Tender, TenderEdit, TenderId};

use super::{new_tender, seed_directory};
use crate::Persistence;

const WRITERS: usize = 4;
const EDITS_PER_WRITER: usize = 10;

/// Removes the database file and its WAL companions when dropped.
struct TempDatabase {
    path: PathBuf,
}

impl TempDatabase {
    fn new() -> Self {
        let path: PathBuf =
            std::env::temp_dir().join(format!("procura-test-{}.db", uuid::Uuid::new_v4()));
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

#[test]
fn test_concurrent_edits_allocate_distinct_versions() {
    let db: TempDatabase = TempDatabase::new();

    let mut owner: Persistence = Persistence::new_with_file(db.path()).unwrap();
    let (org, _, _, _, _) = seed_directory(&mut owner);
    let tender: Tender = owner
        .create_tender(new_tender(org, "alice", "Road repair"))
        .unwrap();
    let id: TenderId = tender.id;

    // connections are opened up front so migrations never race
    let connections: Vec<Persistence> = (0..WRITERS)
        .map(|_| Persistence::new_with_file(db.path()).unwrap())
        .collect();

    let handles: Vec<JoinHandle<Vec<i32>>> = connections
        .into_iter()
        .enumerate()
        .map(|(writer, mut persistence)| {
            std::thread::spawn(move || {
                (0..EDITS_PER_WRITER)
                    .map(|edit| {
                        let change: TenderEdit = TenderEdit {
                            description: Some(format!("writer {writer} edit {edit}")),
                            ..TenderEdit::default()
                        };
                        persistence.edit_tender(id, &change).unwrap().version.value()
                    })
                    .collect()
            })
        })
        .collect();

    let mut versions: Vec<i32> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();
    versions.sort_unstable();

    let total: i32 = i32::try_from(WRITERS * EDITS_PER_WRITER).unwrap();
    let expected: Vec<i32> = (2..=total + 1).collect();
    assert_eq!(versions, expected, "every edit must get its own version");

    let history: Vec<Tender> = owner.tender_history(id).unwrap();
    assert_eq!(history.len(), WRITERS * EDITS_PER_WRITER + 1);
    assert_eq!(
        owner.get_tender(id).unwrap().version.value(),
        total + 1
    );
}

#[test]
fn test_concurrent_edits_and_rollbacks_interleave_without_gaps() {
    let db: TempDatabase = TempDatabase::new();

    let mut owner: Persistence = Persistence::new_with_file(db.path()).unwrap();
    let (org, _, _, _, _) = seed_directory(&mut owner);
    let id: TenderId = owner
        .create_tender(new_tender(org, "alice", "Road repair"))
        .unwrap()
        .id;

    let mut editor: Persistence = Persistence::new_with_file(db.path()).unwrap();
    let mut roller: Persistence = Persistence::new_with_file(db.path()).unwrap();

    let edits: JoinHandle<()> = std::thread::spawn(move || {
        for n in 0..EDITS_PER_WRITER {
            let change: TenderEdit = TenderEdit {
                description: Some(format!("edit {n}")),
                ..TenderEdit::default()
            };
            editor.edit_tender(id, &change).unwrap();
        }
    });
    let rollbacks: JoinHandle<()> = std::thread::spawn(move || {
        for _ in 0..EDITS_PER_WRITER {
            roller
                .rollback_tender(id, procura_domain::Version::FIRST)
                .unwrap();
        }
    });
    edits.join().unwrap();
    rollbacks.join().unwrap();

    let versions: Vec<i32> = owner
        .tender_history(id)
        .unwrap()
        .iter()
        .map(|t| t.version.value())
        .collect();
    let total: i32 = i32::try_from(2 * EDITS_PER_WRITER).unwrap();
    assert_eq!(versions, (1..=total + 1).collect::<Vec<i32>>());
}
