use std::collections::VecDeque;

use proptest::prelude::*;

use vortex_mem::LinkedList;

#[derive(Debug, Clone)]
enum Op {
    PushBack(i16),
    PushFront(i16),
    PopFront,
    RemoveFirst(i16),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i16>().prop_map(Op::PushBack),
        any::<i16>().prop_map(Op::PushFront),
        Just(Op::PopFront),
        (-4i16..4).prop_map(Op::RemoveFirst),
    ]
}

proptest! {
    #[test]
    fn agrees_with_vec_deque(ops in proptest::collection::vec(op(), 0..256)) {
        let mut list = LinkedList::new();
        let mut model = VecDeque::new();
        for op in ops {
            match op {
                Op::PushBack(v) => {
                    list.push_back(v);
                    model.push_back(v);
                },
                Op::PushFront(v) => {
                    list.push_front(v);
                    model.push_front(v);
                },
                Op::PopFront => {
                    prop_assert_eq!(list.pop_front(), model.pop_front());
                },
                Op::RemoveFirst(v) => {
                    let expected = model
                        .iter()
                        .position(|&x| x == v)
                        .and_then(|i| model.remove(i));
                    prop_assert_eq!(list.remove_first(|&x| x == v), expected);
                },
            }
            prop_assert_eq!(list.len(), model.len());
            prop_assert_eq!(list.front(), model.front());
            prop_assert_eq!(list.back(), model.back());
        }
        prop_assert!(list.iter().eq(model.iter()));
    }
}
