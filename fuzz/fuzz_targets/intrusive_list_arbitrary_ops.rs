#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::ds::IntrusiveList;

// Fuzz arbitrary operation sequences on IntrusiveList
//
// Each pair of bytes is (opcode, operand). Handles are kept after removal so
// stale-handle paths get exercised too.
fuzz_target!(|data: &[u8]| {
    let mut list: IntrusiveList<u32> = IntrusiveList::new();
    let mut ids = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 6;
        let value = u32::from(pair[1]);

        match op {
            0 => {
                let id = list.push_front(value);
                ids.push(id);
                assert_eq!(list.front_id(), Some(id));
            }
            1 => {
                let id = list.push_back(value);
                ids.push(id);
                assert_eq!(list.back_id(), Some(id));
            }
            2 => {
                if !ids.is_empty() {
                    let id = ids[value as usize % ids.len()];
                    let old_len = list.len();
                    let live = list.contains(id);
                    let removed = list.remove(id);
                    assert_eq!(removed.is_some(), live);
                    assert_eq!(list.len(), old_len - usize::from(live));
                    assert!(!list.contains(id));
                }
            }
            3 => {
                if !ids.is_empty() {
                    let id = ids[value as usize % ids.len()];
                    let old_len = list.len();
                    if list.move_to_front(id) {
                        assert_eq!(list.front_id(), Some(id));
                    }
                    assert_eq!(list.len(), old_len);
                }
            }
            4 => {
                let old_len = list.len();
                match list.pop_back() {
                    Some(_) => assert_eq!(list.len(), old_len - 1),
                    None => assert_eq!(old_len, 0),
                }
            }
            5 => {
                list.clear();
                assert!(list.is_empty());
                assert_eq!(list.front(), None);
                assert_eq!(list.back(), None);
            }
            _ => unreachable!(),
        }

        assert!(list.check_invariants().is_ok());
    }
});
