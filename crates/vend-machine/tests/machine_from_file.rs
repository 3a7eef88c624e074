//! Boots machines from config files on disk and runs purchases on them.

use std::path::PathBuf;

use vend_core::{Money, VendError};
use vend_machine::{replay, Machine, MachineConfig, MachineError, Outcome, Step};

fn write_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("vend-{}-{}.toml", name, std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

fn steps(raw: &[&str]) -> Vec<Step> {
    raw.iter().map(|s| s.parse().unwrap()).collect()
}

const LOBBY: &str = r#"
[machine]
name = "Lobby"

[[coins]]
denomination = 25
count = 10

[[coins]]
denomination = 100
count = 10

[[coins]]
denomination = 500
count = 5

[[products]]
name = "coke"
price = 200
stock = 1

[[products]]
name = "water"
price = 125
stock = 3
"#;

#[test]
fn test_load_and_buy() {
    let path = write_config("lobby", LOBBY);
    let config = MachineConfig::load(Some(path.clone())).unwrap();
    let machine = Machine::from_config(&config).unwrap();

    let outcomes = replay(
        &machine,
        &steps(&["insert:500", "insert:200", "insert:25", "insert:25", "buy:coke", "buy:coke"]),
    );

    match &outcomes[4] {
        Outcome::Vended(vended) => {
            assert_eq!(vended.product, "coke");
            assert_eq!(vended.change.to_string(), "500 * 1; 25 * 2;");
        }
        other => panic!("expected a sale, got {}", other),
    }
    assert!(matches!(
        outcomes[5],
        Outcome::Refused(VendError::ProductUnavailable { .. })
    ));

    // 500+200+25+25 in, 500+25+25 out.
    assert_eq!(machine.coins().count(Money::from_cents(200)), 1);
    assert_eq!(machine.coins().count(Money::from_cents(25)), 10);

    std::fs::remove_file(path).unwrap();
}

#[test]
fn test_separate_replays_share_the_float() {
    let path = write_config("float", LOBBY);
    let machine = Machine::from_config(&MachineConfig::load(Some(path.clone())).unwrap()).unwrap();

    let first = replay(&machine, &steps(&["insert:100", "insert:25", "buy:water"]));
    let second = replay(&machine, &steps(&["insert:200", "buy:water"]));

    assert!(matches!(first[2], Outcome::Vended(_)));
    match &second[1] {
        Outcome::Vended(vended) => assert_eq!(vended.change.total(), Money::from_cents(75)),
        other => panic!("expected a sale, got {}", other),
    }
    let water = machine.product_id("water").unwrap();
    assert_eq!(machine.catalog().product(&water).map(|p| p.stock()), Some(1));

    std::fs::remove_file(path).unwrap();
}

#[test]
fn test_invalid_file_is_reported() {
    let path = write_config(
        "bad",
        "[machine]\ndenominations = [25, 100]\n\n[[coins]]\ndenomination = 500\ncount = 1\n",
    );

    let err = MachineConfig::load(Some(path.clone())).unwrap_err();
    assert!(matches!(err, MachineError::Validation(_)));

    std::fs::remove_file(path).unwrap();
}
