//! End-to-end chain tests

use std::cell::Cell;
use std::rc::Rc;

use seqchain::{Capabilities, Cursor, Error, Key, KeyedArray, Result, Seq, SeqConfig};

fn pairs<V>(arr: KeyedArray<V>) -> Vec<(Key, V)> {
    arr.into_pairs()
}

#[test]
fn test_range_filter_transform_to_array() {
    let seq = Seq::range(1, 5).expect("range");
    assert_eq!(seq.fork().unwrap().to_vec().unwrap(), vec![1, 2, 3, 4, 5]);

    let evens = seq.filter(|x| x % 2 == 0);
    assert_eq!(evens.fork().unwrap().to_vec().unwrap(), vec![2, 4]);

    let arr = evens.transform(|x| x * 10).to_array().expect("to_array");

    // Filter preserves upstream keys: 2 was at key 1, 4 at key 3.
    assert_eq!(pairs(arr.clone()), vec![(Key::Int(1), 20), (Key::Int(3), 40)]);
    assert_eq!(arr.into_values(), vec![20, 40]);
}

#[test]
fn test_distinct_scenario() {
    let out = Seq::from_array(vec![3, 1, 3, 2, 1])
        .distinct()
        .to_array()
        .unwrap();
    assert_eq!(out.into_values(), vec![3, 1, 2]);
}

#[test]
fn test_take_last_scenarios() {
    let src = Seq::from_array(vec![1, 2, 3, 4, 5]);
    assert_eq!(
        src.fork().unwrap().take_last(2).unwrap().to_vec().unwrap(),
        vec![4, 5]
    );
    assert_eq!(
        src.fork().unwrap().take_last(10).unwrap().to_vec().unwrap(),
        vec![1, 2, 3, 4, 5]
    );
    assert!(src.take_last(0).unwrap().to_array().unwrap().is_empty());
}

#[test]
fn test_take_last_over_generator_fails_take_first_succeeds() {
    let err = Seq::from_generator(1..=5).take_last(2).unwrap_err();
    assert!(matches!(err, Error::Unsupported(_)));

    let first = Seq::from_generator(1..=5).take_first(2).to_vec().unwrap();
    assert_eq!(first, vec![1, 2]);
}

#[test]
fn test_range_zero_step_is_invalid_argument() {
    assert!(matches!(
        Seq::range_by(1, 5, 0),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_long_chain_mixed_operators() {
    let out = Seq::range(1, 100)
        .unwrap()
        .filter(|x| x % 3 == 0)
        .transform(|x| x % 10)
        .distinct()
        .take_last(3)
        .unwrap()
        .to_array()
        .unwrap();
    // Multiples of 3 mod 10 first appear as 3,6,9,2,5,8,1,4,7,0.
    assert_eq!(out.values().copied().collect::<Vec<_>>(), vec![4, 7, 0]);
    assert_eq!(
        out.keys().cloned().collect::<Vec<_>>(),
        vec![Key::Int(23), Key::Int(26), Key::Int(29)]
    );
}

#[test]
fn test_nothing_runs_until_pulled() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let mut seq = Seq::from_generator(0..1_000_000)
        .transform(move |x| {
            counter.set(counter.get() + 1);
            x * 2
        })
        .filter(|x| x % 4 == 0)
        .take_first(3);
    assert_eq!(calls.get(), 0);

    assert_eq!(seq.to_vec().unwrap(), vec![0, 4, 8]);
    assert_eq!(calls.get(), 5);
}

#[test]
fn test_for_loop_consumes_chain() {
    let mut total = 0;
    for pair in Seq::from_array(vec![1, 2, 3]).transform(|x| x * x) {
        let (_, v) = pair.unwrap();
        total += v;
    }
    assert_eq!(total, 14);
}

#[test]
fn test_restart_rewinds_whole_chain() {
    let mut seq = Seq::from_array(vec!["a", "b", "a", "c", "b"])
        .distinct()
        .take_first(2);
    assert_eq!(seq.to_vec().unwrap(), vec!["a", "b"]);
    assert!(!seq.has_more().unwrap());
    seq.restart().unwrap();
    assert!(seq.has_more().unwrap());
    assert_eq!(seq.to_vec().unwrap(), vec!["a", "b"]);
}

#[test]
fn test_fork_shares_restartable_upstream() {
    let base = Seq::from_array((1..=6).collect::<Vec<i32>>()).transform(|x| x * 2);
    let mut small = base.fork().unwrap().filter(|x| *x < 6);
    let mut last = base.take_last(2).unwrap();
    assert_eq!(small.to_vec().unwrap(), vec![2, 4]);
    assert_eq!(last.to_vec().unwrap(), vec![10, 12]);
}

#[test]
fn test_string_keyed_source_round_trip() {
    let mut input = KeyedArray::new();
    input.insert(Key::from("alice"), 31);
    input.insert(Key::from("bob"), 17);
    input.insert(Key::from("carol"), 45);

    let adults = Seq::from(input).filter(|age| *age >= 18).to_array().unwrap();
    assert_eq!(adults.len(), 2);
    assert_eq!(adults.get(&Key::from("alice")), Some(&31));
    assert!(!adults.contains_key(&Key::from("bob")));
}

#[test]
fn test_callback_error_partial_results() {
    let mut seq = Seq::from_array(vec!["1", "2", "oops", "4"])
        .try_transform(|s: &str| s.parse::<i32>());

    let mut kept = Vec::new();
    let err = loop {
        match seq.next_pair() {
            Ok(Some((_, v))) => kept.push(v),
            Ok(None) => panic!("expected a failure"),
            Err(e) => break e,
        }
    };
    assert_eq!(kept, vec![1, 2]);
    let Error::Callback(inner) = err else {
        panic!("expected callback error");
    };
    assert!(inner.downcast_ref::<std::num::ParseIntError>().is_some());
}

#[test]
fn test_config_from_seq_is_inherited() {
    let cfg = SeqConfig {
        distinct_capacity_hint: 1,
        ..SeqConfig::default()
    };
    let mut seq = Seq::from_array(vec![1, 2, 2, 3]).with_config(cfg).distinct();
    assert_eq!(seq.config().distinct_capacity_hint, 1);
    assert_eq!(seq.to_vec().unwrap(), vec![1, 2, 3]);
}

/// External source: countdown that can restart but has no cheap count.
struct Countdown {
    from: u32,
    cur: u32,
}

impl Cursor<u32> for Countdown {
    fn name(&self) -> &'static str {
        "countdown"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::finite()
    }

    fn pull(&mut self) -> Result<Option<(Key, u32)>> {
        if self.cur == 0 {
            return Ok(None);
        }
        let key = Key::from((self.from - self.cur) as usize);
        let v = self.cur;
        self.cur -= 1;
        Ok(Some((key, v)))
    }

    fn restart(&mut self) -> Result<()> {
        self.cur = self.from;
        Ok(())
    }

    fn fork(&self) -> Result<Box<dyn Cursor<u32>>> {
        Ok(Box::new(Countdown {
            from: self.from,
            cur: self.from,
        }))
    }
}

#[test]
fn test_external_cursor_source() {
    let src = Seq::from_cursor(Box::new(Countdown { from: 5, cur: 5 }));
    let mut seq = src.take_last(2).unwrap();
    assert_eq!(seq.count().unwrap(), 2);
    assert_eq!(
        pairs(seq.to_array().unwrap()),
        vec![(Key::Int(3), 2), (Key::Int(4), 1)]
    );
}
