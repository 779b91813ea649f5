mod common;

use std::collections::HashSet;

use common::{new_store, seed_snippet};
use proptest::prelude::*;
use snippets_core::{SnippetQuery, SnippetStore, UserId};

const AUTHORS: [&str; 3] = ["alice", "bob", "carol"];

fn arb_rows() -> impl Strategy<Value = Vec<(usize, bool, i64)>> {
    prop::collection::vec((0..AUTHORS.len(), any::<bool>(), 0i64..500), 0..40)
}

proptest! {
    #[test]
    fn public_listing_is_exactly_the_approved_set_newest_first(rows in arb_rows()) {
        let mut store = new_store();
        let mut approved_ids = HashSet::new();
        for (author, approved, minute) in &rows {
            let id = seed_snippet(&mut store, AUTHORS[*author], *approved, *minute, &[]);
            if *approved {
                approved_ids.insert(id);
            }
        }

        let listed = store.find(&SnippetQuery::public()).unwrap();

        let listed_ids: HashSet<String> = listed.iter().map(|s| s.id.clone()).collect();
        prop_assert_eq!(listed_ids, approved_ids);
        prop_assert_eq!(listed.len(), listed.iter().filter(|s| s.approved).count());
        for pair in listed.windows(2) {
            prop_assert!(pair[0].created >= pair[1].created);
        }
    }

    #[test]
    fn mine_listing_is_exactly_the_authored_set(rows in arb_rows(), who in 0..AUTHORS.len()) {
        let mut store = new_store();
        let mut mine = HashSet::new();
        for (author, approved, minute) in &rows {
            let id = seed_snippet(&mut store, AUTHORS[*author], *approved, *minute, &[]);
            if *author == who {
                mine.insert(id);
            }
        }

        let listed = store
            .find(&SnippetQuery::authored_by(UserId::new(AUTHORS[who])))
            .unwrap();

        let listed_ids: HashSet<String> = listed.iter().map(|s| s.id.clone()).collect();
        prop_assert_eq!(listed_ids, mine);
        for pair in listed.windows(2) {
            prop_assert!(pair[0].created >= pair[1].created);
        }
    }
}

#[test]
fn test_public_listing_order_example() {
    let mut store = new_store();
    let old = seed_snippet(&mut store, "alice", true, 1, &[]);
    let _hidden = seed_snippet(&mut store, "bob", false, 5, &[]);
    let new = seed_snippet(&mut store, "bob", true, 9, &[]);

    let ids: Vec<String> = store
        .find(&SnippetQuery::public())
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();

    assert_eq!(ids, vec![new, old]);
}
