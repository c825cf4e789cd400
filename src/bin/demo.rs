//! trait-compose demonstration binary.
//!
//! Walks through the library's surface with two small domains: chimera
//! animals composed from flight and running capabilities, and an issue
//! tracker whose priority and planning window are bolted on at runtime.
//! The binary is a plain consumer of the library; it imposes no contract
//! back on it.
//!
//! # Environment Variables
//!
//! - `RUST_LOG` — log filter (e.g. "trace" to watch registry activity)
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin demo
//! ```

use chrono::{DateTime, Duration, Utc};
use trait_compose::{
    MutableCompositeTrait, MutableTrait, Trait, TraitBox, TraitError, TraitExt,
};

// --- Animal domain -------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bird {
    wings: u32,
}

impl Bird {
    fn can_fly(&self) -> bool {
        self.wings > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Dog {
    legs: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Fish {
    fins: u32,
}

fn chirp(bird: &Bird) {
    let can = if bird.can_fly() { "can" } else { "can not" };
    println!("With {} wings I {} fly", bird.wings, can);
}

fn bark(dog: &Dog) {
    let gait = if dog.legs == 4 { "run fast" } else { "walk" };
    println!("With {} legs I can {}", dog.legs, gait);
}

fn bubble(fish: &Fish) {
    println!("With {} fins I can swim (blub)", fish.fins);
}

// --- Issue domain --------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
struct Priority(i32);

#[derive(Debug, Clone, Copy, PartialEq)]
struct Plan {
    begin: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl Plan {
    fn unplanned() -> Self {
        Self { begin: None, end: None }
    }

    fn duration(&self) -> Option<Duration> {
        Some(self.end? - self.begin?)
    }
}

/// An issue with no static inheritance: everything beyond id and
/// description is a runtime capability.
struct Issue {
    id: String,
    description: String,
    traits: MutableCompositeTrait,
}

impl Issue {
    fn new(id: &str, description: &str) -> Self {
        let mut traits = MutableCompositeTrait::new();
        traits
            .set(Box::new(MutableTrait::new(Priority(0))))
            .set(Box::new(MutableTrait::new(Plan::unplanned())));
        Self {
            id: id.to_string(),
            description: description.to_string(),
            traits,
        }
    }
}

fn animal_demo() -> Result<(), TraitError> {
    println!("--- animals ---");

    // A wolpertinger: a chimera composed from bird, dog, and fish
    // capabilities. The bird entry lands last in enumeration order.
    let mut wolpertinger = MutableTrait::new(Bird { wings: 2 }).compose_mutable([
        Box::new(MutableTrait::new(Dog { legs: 4 })) as TraitBox,
        Box::new(Trait::new(Fish { fins: 2 })),
    ])?;

    bubble(wolpertinger.value::<Fish>().expect("composed with fins"));
    chirp(wolpertinger.value::<Bird>().expect("composed with wings"));

    // Lose a leg through the composite, which owns the wrapper now.
    let dog = wolpertinger.mutable_mut::<Dog>().expect("composed with legs");
    dog.set(Dog { legs: 3 });
    bark(wolpertinger.value::<Dog>().expect("composed with legs"));

    // Conversion snapshots: grounding the snapshot does not ground the
    // wolpertinger itself.
    let mut grounded = wolpertinger
        .to_mutable::<Bird>()
        .expect("composed with wings")
        .into_owned();
    grounded.set(Bird { wings: 0 });
    chirp(grounded.payload());
    chirp(wolpertinger.value::<Bird>().expect("still winged"));

    println!("wolpertinger = {}", wolpertinger);
    Ok(())
}

fn issue_demo() {
    println!("--- issues ---");

    let mut issue = Issue::new("T0001", "my task");
    println!("{}: {}", issue.id, issue.description);

    let priority = issue.traits.value::<Priority>().expect("has a priority");
    println!("priority: {}", priority.0);

    // Escalate.
    issue
        .traits
        .mutable_mut::<Priority>()
        .expect("has a priority")
        .set(Priority(2));
    let priority = issue.traits.value::<Priority>().expect("has a priority");
    println!("priority: {}", priority.0);

    // Plan an eight-hour window.
    let begin = Utc::now();
    issue
        .traits
        .mutable_mut::<Plan>()
        .expect("has a plan")
        .set(Plan { begin: Some(begin), end: Some(begin + Duration::hours(8)) });

    let plan = issue.traits.value::<Plan>().expect("has a plan");
    println!(
        "begin: {:?}, end: {:?}, duration: {:?}",
        plan.begin, plan.end, plan.duration()
    );
}

fn main() -> Result<(), TraitError> {
    env_logger::init();

    animal_demo()?;
    println!();
    issue_demo();
    Ok(())
}
