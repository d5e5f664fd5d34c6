extern crate rand;
extern crate splay_set;

use rand::Rng;
use splay_set::simple_set::SimpleSet;
use splay_set::splay_tree::SplaySet;
use std::collections::{BTreeSet, HashSet};

const NUM_OF_OPERATIONS: usize = 100_000;

#[test]
fn int_test_splay_set() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = SplaySet::new();
    let mut expected = BTreeSet::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let val = rng.gen_range(0, 1024u32);
        match rng.gen_range(0, 3) {
            0 => assert_eq!(set.insert(val), expected.insert(val)),
            1 => assert_eq!(set.remove(&val), expected.remove(&val)),
            _ => {
                assert_eq!(set.contains(&val), expected.contains(&val));
                assert_eq!(set.root().is_some(), !expected.is_empty());
            },
        }
        assert_eq!(set.len(), expected.len());
    }

    assert_eq!(
        set.iter().collect::<Vec<&u32>>(),
        expected.iter().collect::<Vec<&u32>>(),
    );
    assert_eq!(set.min(), expected.iter().next());
    assert_eq!(set.max(), expected.iter().next_back());
}

#[test]
fn int_test_splay_set_sequential() {
    // ascending inserts degenerate the tree into a path; lookups must splay it back
    let mut set = SplaySet::new();
    for i in 0..NUM_OF_OPERATIONS as u32 {
        assert!(set.insert(i));
        assert_eq!(set.root(), Some(&i));
    }
    for i in 0..NUM_OF_OPERATIONS as u32 {
        assert!(set.contains(&i));
        assert_eq!(set.root(), Some(&i));
    }
    for i in (0..NUM_OF_OPERATIONS as u32).rev() {
        assert!(set.remove(&i));
    }
    assert!(set.is_empty());
    assert_eq!(set.to_string(), "");
}

#[test]
fn int_test_differential_scenario() {
    let mut set: SplaySet<u32> = SplaySet::new();
    let mut reference: HashSet<u32> = HashSet::new();

    assert_eq!(SimpleSet::insert(&mut set, 5), SimpleSet::insert(&mut reference, 5));
    assert_eq!(SimpleSet::insert(&mut set, 3), SimpleSet::insert(&mut reference, 3));
    assert_eq!(SimpleSet::insert(&mut set, 8), SimpleSet::insert(&mut reference, 8));

    assert!(SimpleSet::contains(&mut set, &3));
    assert!(SimpleSet::contains(&mut reference, &3));
    assert_eq!(set.root(), Some(&3));

    assert!(SimpleSet::remove(&mut set, &5));
    assert!(SimpleSet::remove(&mut reference, &5));

    assert!(!SimpleSet::contains(&mut set, &5));
    assert!(!SimpleSet::contains(&mut reference, &5));

    assert_eq!(SimpleSet::len(&set), 2);
    assert_eq!(SimpleSet::len(&reference), 2);
}

#[test]
fn int_test_idempotent_miss() {
    let mut set: SplaySet<u32> = vec![1, 5, 9].into_iter().collect();
    assert!(!set.remove(&4));
    assert!(!set.remove(&4));
    assert_eq!(set.len(), 3);
}

#[test]
fn int_test_equal_members_are_the_same() {
    use std::cmp::Ordering;

    #[derive(Debug)]
    struct Tagged(u32, &'static str);

    impl PartialEq for Tagged {
        fn eq(&self, other: &Tagged) -> bool {
            self.0 == other.0
        }
    }

    impl Eq for Tagged {}

    impl PartialOrd for Tagged {
        fn partial_cmp(&self, other: &Tagged) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for Tagged {
        fn cmp(&self, other: &Tagged) -> Ordering {
            self.0.cmp(&other.0)
        }
    }

    let mut set = SplaySet::new();
    assert!(set.insert(Tagged(1, "first")));
    assert!(!set.insert(Tagged(1, "second")));
    assert_eq!(set.len(), 1);
    assert_eq!(set.get(&Tagged(1, "")).map(|tagged| tagged.1), Some("first"));
}
