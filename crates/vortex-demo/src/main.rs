use std::{
    hint::black_box,
    time::{Duration, Instant},
};

use vortex_mem::{GrowVec, HashTable, LinkedList};

const DEFAULT_COUNT: usize = 1_000_000;

fn count_from_env() -> usize {
    match std::env::var("VORTEX_DEMO_COUNT") {
        Ok(value) => match value.trim().parse() {
            Ok(count) => count,
            Err(_) => {
                vortex_log::warn!("invalid VORTEX_DEMO_COUNT {:?}, using {}", value, DEFAULT_COUNT);
                DEFAULT_COUNT
            },
        },
        Err(_) => DEFAULT_COUNT,
    }
}

fn time_grow_vec(count: usize) -> vortex_mem::Result<(Duration, usize)> {
    let start = Instant::now();
    let mut vec: GrowVec<usize> = GrowVec::new()?;
    for i in 0..count {
        vec.push(black_box(i))?;
    }
    let elapsed = start.elapsed();
    vortex_log::debug!("GrowVec ended with len {} capacity {}", vec.len(), vec.capacity());
    Ok((elapsed, black_box(vec).len()))
}

fn time_std_vec(count: usize) -> (Duration, usize) {
    let start = Instant::now();
    let mut vec = Vec::with_capacity(vortex_mem::INITIAL_CAPACITY);
    for i in 0..count {
        vec.push(black_box(i));
    }
    let elapsed = start.elapsed();
    (elapsed, black_box(vec).len())
}

fn exercise_containers() -> vortex_mem::Result<()> {
    let mut words: HashTable<&str, usize> = HashTable::new();
    let mut order = LinkedList::new();
    for word in "push pop push resize push clear".split(' ') {
        if words.insert(word, 0)? {
            order.push_back(word);
        }
        if let Some(count) = words.get_mut(word) {
            *count += 1;
        }
    }
    order.for_each(|word| {
        vortex_log::trace!("{} seen {} times", word, words[*word]);
    });
    Ok(())
}

fn main() -> Result<(), Box<dyn core::error::Error>> {
    vortex_log::init()?;
    let count = count_from_env();
    vortex_log::info!("pushing {} elements", count);

    let (grow_vec, grow_len) = time_grow_vec(count)?;
    let (std_vec, std_len) = time_std_vec(count);
    if grow_len != std_len {
        vortex_log::error!("length mismatch: GrowVec {} Vec {}", grow_len, std_len);
    }

    vortex_log::always!("GrowVec::push x{}: {:?}", count, grow_vec);
    vortex_log::always!("Vec::push x{}: {:?}", count, std_vec);
    let ratio = grow_vec.as_secs_f64() / std_vec.as_secs_f64().max(f64::EPSILON);
    vortex_log::info!("GrowVec/Vec time ratio {:.3}", ratio);

    exercise_containers()?;
    Ok(())
}
