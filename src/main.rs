//! Stack Shack entry point
//!
//! Native builds run a headless demo: a seeded bot plays one stacking session
//! and the earned discount is applied to a sample order. The browser build is
//! driven from JS through `stack_shack::web`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use std::time::Duration;

    use stack_shack::Storefront;
    use stack_shack::clock::{Driver, SystemClock};
    use stack_shack::consts::TICK_INTERVAL_MS;
    use stack_shack::sim::SessionPhase;

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(42);
    log::info!("Stack Shack (native) demo, seed {}", seed);

    let mut rng = Pcg32::seed_from_u64(seed);
    let mut store = Storefront::default();

    for id in [1, 4, 4, 9] {
        store.add_to_cart(id);
    }

    store.start_game();
    let mut driver = Driver::new(SystemClock::default());
    driver.poll();

    // Bot aims somewhere near center each stage and drops when the item gets there
    let mut target: Option<f32> = None;
    let mut frames = 0u32;
    while let Some(game) = store.game() {
        frames += 1;
        if frames > 20_000 {
            log::warn!("Demo bot gave up");
            break;
        }

        std::thread::sleep(Duration::from_millis(TICK_INTERVAL_MS as u64));
        let dt = driver.poll();

        match game.phase() {
            SessionPhase::Moving => {
                let center = game.config.center_position();
                let aim = *target.get_or_insert_with(|| center + rng.random_range(-60.0..=60.0));
                // A late frame moves the item several steps at once
                let ticks = (dt / game.config.tick_interval_ms.max(1)).max(1);
                if (game.movement.position - aim).abs() <= game.config.step * ticks as f32 {
                    store.drop_item();
                    target = None;
                }
            }
            SessionPhase::Idle => break,
            _ => {}
        }

        store.update(dt);
    }

    if let Some(game) = store.game() {
        log::warn!("Session unfinished in {:?}", game.phase());
    }

    println!("\nOrder:");
    for line in store.cart().lines() {
        println!("  {} x{} @ {}", line.name, line.quantity, line.unit_price);
    }
    println!("Subtotal: {}", store.subtotal());
    match store.discount() {
        Some(discount) => println!("Discount: {} -> Total: {}", discount, store.total()),
        None => println!("No discount earned -> Total: {}", store.total()),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
