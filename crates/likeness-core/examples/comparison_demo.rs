//! Comparison walkthrough
//!
//! This example demonstrates:
//! - Registering types under dotted paths, from code and from TOML
//! - Strict and loose attribute checks
//! - Nested Comparisons and the rendered diff of a failure
//! - Reusing one Comparison across several values
//! - Checking the error side of a `Result` with `ShouldRaise`

use likeness_core::logging_facility::{init, Profile};
use likeness_core::{
    compare, introspect, registry, Comparison, RegistryConfig, ShouldRaise, Value,
};

#[derive(Debug)]
struct Address {
    city: String,
    zip: String,
}

introspect!(Address { city, zip });

#[derive(Debug)]
struct Customer {
    name: String,
    tier: i64,
    address: Value,
}

introspect!(Customer { name, tier, address });

#[derive(Debug, thiserror::Error)]
#[error("no customer with key {key}")]
struct LookupError {
    key: String,
}

introspect!(LookupError { key });

fn find_customer(key: &str) -> Result<Customer, LookupError> {
    match key {
        "c-1" => Ok(Customer {
            name: "Ada".to_string(),
            tier: 2,
            address: Value::object(Address {
                city: "London".to_string(),
                zip: "N1".to_string(),
            }),
        }),
        other => Err(LookupError {
            key: other.to_string(),
        }),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init(Profile::Development);

    // ═══════════════════════════════════════════════════════════
    // SECTION 1: Registry
    // ═══════════════════════════════════════════════════════════
    println!("SECTION 1: Registering types\n");

    registry::register_as::<Customer>("crm.Customer")?;
    registry::register::<Address>()?;
    RegistryConfig::from_toml_str(&format!(
        "[aliases]\n\"crm.Address\" = \"{}\"\n",
        std::any::type_name::<Address>()
    ))?
    .apply_global()?;

    println!("✓ crm.Customer -> {}", registry::resolve("crm.Customer")?);
    println!("✓ crm.Address  -> {}", registry::resolve("crm.Address")?);
    println!();

    // ═══════════════════════════════════════════════════════════
    // SECTION 2: Strict and loose checks
    // ═══════════════════════════════════════════════════════════
    println!("SECTION 2: Strict and loose checks\n");

    let customer = find_customer("c-1")?;

    let loose = Comparison::new("crm.Customer")?
        .with("name", "Ada")
        .strict(false);
    println!("loose match on name only: {}", loose == customer);

    let strict = Comparison::new("crm.Customer")?.with("name", "Ada");
    println!("strict match on name only: {}", strict == customer);
    println!("diagnostic:{}", strict);
    println!();

    // ═══════════════════════════════════════════════════════════
    // SECTION 3: Nested Comparisons
    // ═══════════════════════════════════════════════════════════
    println!("SECTION 3: Nested Comparisons\n");

    let expected = Comparison::new("crm.Customer")?
        .with("name", "Ada")
        .with("tier", 2)
        .with(
            "address",
            Comparison::new("crm.Address")?
                .with("city", "London")
                .with("zip", "N2"),
        );

    match compare(expected, Value::object(customer)) {
        Ok(()) => println!("✓ customer matches"),
        Err(err) => println!("✗ {}", err),
    }
    println!();

    // ═══════════════════════════════════════════════════════════
    // SECTION 4: Reuse
    // ═══════════════════════════════════════════════════════════
    println!("SECTION 4: Reusing one Comparison\n");

    let tier_two = Comparison::of::<Customer>().with("tier", 2).strict(false);
    for key in ["c-1", "c-1"] {
        let found = find_customer(key)?;
        println!(
            "generation {}: {}",
            tier_two.generation() + 1,
            tier_two == found
        );
    }
    println!();

    // ═══════════════════════════════════════════════════════════
    // SECTION 5: Expected errors
    // ═══════════════════════════════════════════════════════════
    println!("SECTION 5: Expected errors\n");

    let raised = ShouldRaise::new(Comparison::of::<LookupError>().with("key", "c-404"))
        .run(|| find_customer("c-404"))?;
    println!("✓ raised {:?}", raised);

    if let Err(err) = ShouldRaise::any().run(|| find_customer("c-1")) {
        println!("✗ {}", err);
    }

    Ok(())
}
