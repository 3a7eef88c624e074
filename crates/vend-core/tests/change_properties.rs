//! Property-based tests for coin acceptance and change-making.
//!
//! These check the all-or-nothing behaviour of `load_change` and the deposit
//! bookkeeping of `VendingSession` over random inventories and amounts.

use proptest::prelude::*;
use vend_core::{
    Catalog, CoinInventory, Money, Product, VendError, VendingSession, CANONICAL_DENOMINATIONS,
};

// =============================================================================
// Strategies
// =============================================================================

fn valid_coin() -> impl Strategy<Value = Money> {
    prop::sample::select(CANONICAL_DENOMINATIONS.to_vec()).prop_map(Money::from_cents)
}

fn invalid_coin() -> impl Strategy<Value = Money> {
    (-1000i64..2000)
        .prop_filter("must not be an accepted coin", |c| {
            !CANONICAL_DENOMINATIONS.contains(c)
        })
        .prop_map(Money::from_cents)
}

fn arbitrary_inventory() -> impl Strategy<Value = CoinInventory> {
    prop::collection::vec(0u32..12, CANONICAL_DENOMINATIONS.len()).prop_map(|counts| {
        CoinInventory::canonical(
            CANONICAL_DENOMINATIONS
                .iter()
                .zip(counts)
                .map(|(&coin, n)| (Money::from_cents(coin), n)),
        )
        .unwrap()
    })
}

/// Prices in quarter steps, like the products the machine sells.
fn arbitrary_price() -> impl Strategy<Value = Money> {
    (1i64..=40).prop_map(|quarters| Money::from_cents(quarters * 25))
}

/// Overpayment, sometimes not a multiple of the smallest coin.
fn arbitrary_overpayment() -> impl Strategy<Value = Money> {
    prop_oneof![
        (0i64..=60).prop_map(|quarters| Money::from_cents(quarters * 25)),
        (0i64..1500).prop_map(Money::from_cents),
    ]
}

// =============================================================================
// Coin Insertion
// =============================================================================

proptest! {
    #[test]
    fn prop_valid_coin_raises_deposit_and_count(
        inventory in arbitrary_inventory(),
        coin in valid_coin()
    ) {
        let mut catalog = Catalog::new();
        let mut coins = inventory.clone();
        let mut session = VendingSession::new(&mut catalog, &mut coins);

        prop_assert!(session.insert_coin(coin).is_ok());
        prop_assert_eq!(session.deposit(), coin);
        prop_assert_eq!(session.coins().count(coin), inventory.count(coin) + 1);
    }

    #[test]
    fn prop_invalid_coin_changes_nothing(
        inventory in arbitrary_inventory(),
        coin in invalid_coin()
    ) {
        let mut catalog = Catalog::new();
        let mut coins = inventory.clone();
        let mut session = VendingSession::new(&mut catalog, &mut coins);

        let result = session.insert_coin(coin);

        prop_assert_eq!(result, Err(VendError::InvalidDenomination { coin }));
        prop_assert_eq!(session.deposit(), Money::zero());
        prop_assert_eq!(coins, inventory);
    }
}

// =============================================================================
// Change-Making
// =============================================================================

proptest! {
    #[test]
    fn prop_exact_payment_returns_no_change(
        inventory in arbitrary_inventory(),
        price in arbitrary_price()
    ) {
        let mut coins = inventory.clone();
        let change = coins.load_change(price, price).unwrap();

        prop_assert!(change.is_empty());
        prop_assert_eq!(coins, inventory);
    }

    #[test]
    fn prop_load_change_is_all_or_nothing(
        inventory in arbitrary_inventory(),
        price in arbitrary_price(),
        extra in arbitrary_overpayment()
    ) {
        let mut coins = inventory.clone();
        let deposit = price + extra;

        match coins.load_change(deposit, price) {
            Ok(change) => {
                prop_assert_eq!(change.total(), extra);
                for (&coin, &before) in inventory.coins() {
                    prop_assert_eq!(coins.count(coin) + change.get(coin), before);
                }
            }
            Err(VendError::InsufficientChange { required, remaining }) => {
                prop_assert_eq!(required, extra);
                prop_assert!(!remaining.is_zero());
                prop_assert_eq!(coins, inventory);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn prop_plan_matches_load(
        inventory in arbitrary_inventory(),
        amount in arbitrary_overpayment()
    ) {
        let mut coins = inventory.clone();
        let planned = inventory.plan_change(amount);
        let loaded = coins.load_change(amount, Money::zero());

        prop_assert_eq!(planned, loaded);
    }

    #[test]
    fn prop_unlimited_supply_always_pays_quarters(quarters in 0i64..=200) {
        let coins = CoinInventory::canonical(
            CANONICAL_DENOMINATIONS.iter().map(|&c| (Money::from_cents(c), 1_000)),
        )
        .unwrap();

        let change = coins.plan_change(Money::from_cents(quarters * 25)).unwrap();
        prop_assert_eq!(change.total().cents(), quarters * 25);
    }
}

// =============================================================================
// Withdrawal
// =============================================================================

proptest! {
    #[test]
    fn prop_short_deposit_never_mutates(
        inventory in arbitrary_inventory(),
        coin in valid_coin(),
        attempts in 1usize..8
    ) {
        let mut catalog = Catalog::new();
        let price = coin + Money::from_cents(25);
        let id = catalog.insert(Product::new("snack", price, 3).unwrap());
        let mut coins = inventory;
        let mut session = VendingSession::new(&mut catalog, &mut coins);
        session.insert_coin(coin).unwrap();
        let coins_after_insert = CoinInventory::clone(session.coins());

        for _ in 0..attempts {
            let err = session.withdraw_product(&id).unwrap_err();
            let is_short = matches!(err, VendError::InsufficientDeposit { .. });
            prop_assert!(is_short);
        }

        prop_assert_eq!(session.deposit(), coin);
        prop_assert_eq!(&**session.coins(), &coins_after_insert);
        prop_assert_eq!(catalog.get(&id).map(|p| p.stock()), Some(3));
    }
}
