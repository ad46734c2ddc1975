//! Demo binary for `bptree-map`.
//!
//! Inserts odd keys into a small-order tree, pretty-prints the resulting
//! structure, probes every key in range, and reports the average number of
//! nodes visited per lookup.
//!
//! Run with:
//! ```bash
//! cargo run -- 30
//! cargo run -- 30 --random
//! RUST_LOG=bptree_map=debug cargo run --features tracing -- 30
//! ```

#![allow(clippy::cast_precision_loss)]

use bptree_map::BpTreeMap;

/// Small LCG so the random mode needs no dependencies.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: u64) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1);
        (self.0 >> 33) % bound
    }
}

fn main() {
    bptree_map::init_tracing();

    let mut args = std::env::args().skip(1);
    let total_keys: u64 = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(30);
    let randomly = args.any(|arg| arg == "--random");

    let mut tree: BpTreeMap<u64, u64> = match BpTreeMap::with_order(5) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("failed to build tree: {err}");
            return;
        }
    };

    let mut rng = Lcg(0x9e37_79b9_7f4a_7c15);
    for i in (1..=total_keys).step_by(2) {
        if randomly {
            let key = rng.next(2 * total_keys);
            tree.insert(key, i * i);
        } else {
            tree.insert(i, i * i);
        }
    }

    println!("{}", tree.render());

    tree.reset_accesses();
    for i in 0..=total_keys {
        println!("key = {i}, value = {:?}", tree.get(&i));
    }
    println!("{}", "-".repeat(43));
    println!("number of keys in tree = {}", tree.len());
    println!("{}", "-".repeat(43));
    println!(
        "average number of nodes accessed = {:.2}",
        tree.accesses() as f64 / (total_keys + 1) as f64
    );
}
