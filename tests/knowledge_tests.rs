//! Deduction scenarios replayed through the knowledge engine.
//!
//! All tests use the same fixed deal: the non-solution cards dealt round
//! robin in card order.
//!
//! | seat | hand |
//! |------|------|
//! | P0 | Scarlet, Peacock, Lead Pipe, Revolver, Lounge, Conservatory |
//! | P1 | White, Plum, Wrench, Study, Dining Room, Billiard Room |
//! | P2 | Green, Candlestick, Knife, Hall, Ball Room, Library |
//!
//! Solution: Mustard with the Rope in the Kitchen.

use rust_clue::cards::{Card, CardRegistry, Category, Room, Suspect, Triple, Weapon};
use rust_clue::core::{ClueError, Inconsistency, Perspective, PlayerId};
use rust_clue::knowledge::{CardStatus, Constraint, KnowledgeEngine, Observation};

fn p(i: u8) -> PlayerId {
    PlayerId::new(i)
}

fn solution() -> Triple {
    Triple::new(Suspect::Mustard, Weapon::Rope, Room::Kitchen)
}

fn registry() -> CardRegistry {
    let solution = solution();
    let mut hands = vec![Vec::new(), Vec::new(), Vec::new()];
    for (i, card) in Card::all().filter(|c| !solution.contains(*c)).enumerate() {
        hands[i % 3].push(card);
    }
    CardRegistry::from_parts(solution, hands).unwrap()
}

fn engine() -> (KnowledgeEngine, CardRegistry) {
    let registry = registry();
    let mut engine = KnowledgeEngine::new(registry.hand_sizes(), false);
    engine.seed_hands(&registry).unwrap();
    (engine, registry)
}

/// Broadcast a suggestion by `suggester` and its disproofs, answered the way
/// the hands dictate: clockwise, first holder shows `shown` (or its lowest
/// matching card).
fn suggest(
    engine: &mut KnowledgeEngine,
    registry: &CardRegistry,
    suggester: PlayerId,
    triple: Triple,
    shown: Option<Card>,
) {
    engine
        .broadcast(&Observation::SuggestionMade { suggester, triple })
        .unwrap();
    for candidate in suggester.clockwise_after(registry.player_count()) {
        let matching = registry.hand(candidate).matching(&triple);
        if matching.is_empty() {
            engine
                .broadcast(&Observation::DisproofDeclined {
                    player: candidate,
                    triple,
                })
                .unwrap();
            continue;
        }
        let card = shown.filter(|c| matching.contains(c)).unwrap_or(matching[0]);
        engine
            .broadcast(&Observation::DisproofShown {
                disprover: candidate,
                suggester,
                triple,
                card: Some(card),
            })
            .unwrap();
        return;
    }
}

#[test]
fn test_five_suggestion_scenario() {
    let (mut engine, registry) = engine();
    let dining = Card::from(Room::DiningRoom);
    let green = Card::from(Suspect::Green);
    let white = Card::from(Suspect::White);

    // 1. P1 shows White to P0.
    suggest(&mut engine, &registry, p(0), Triple::new(Suspect::White, Weapon::Candlestick, Room::Study), Some(white));
    // 2. P2 shows P1 a card P0 does not see.
    suggest(&mut engine, &registry, p(1), Triple::new(Suspect::Green, Weapon::Knife, Room::DiningRoom), None);
    // 3. P0 cannot disprove; P1 shows P2 a card.
    suggest(&mut engine, &registry, p(2), Triple::new(Suspect::Plum, Weapon::Wrench, Room::Hall), None);
    // 4. P1 shows the Dining Room to P0.
    suggest(&mut engine, &registry, p(0), Triple::new(Suspect::Mustard, Weapon::Rope, Room::DiningRoom), None);
    // 5. P1 cannot disprove; P2 shows Green to P0.
    suggest(&mut engine, &registry, p(0), Triple::new(Suspect::Green, Weapon::Rope, Room::Kitchen), Some(green));

    let belief = engine.belief(p(0));
    let mut expected = [CardStatus::Unknown; Card::COUNT];
    for &card in registry.hand(p(0)).cards() {
        expected[card.index()] = CardStatus::KnownHeld(Some(p(0)));
    }
    expected[white.index()] = CardStatus::KnownHeld(Some(p(1)));
    expected[dining.index()] = CardStatus::KnownHeld(Some(p(1)));
    expected[green.index()] = CardStatus::KnownHeld(Some(p(2)));
    assert_eq!(belief.statuses(), expected);

    // P2's hidden disproof in step 2 is explained by Green; P1's in step 3
    // is still open.
    assert_eq!(belief.constraints().len(), 1);
    assert!(matches!(
        &belief.constraints()[0],
        Constraint::AtLeastOne { holder, .. } if *holder == p(1)
    ));

    assert_eq!(
        belief.solution_candidates(Category::Suspect).as_slice(),
        &[Card::from(Suspect::Mustard), Card::from(Suspect::Plum)]
    );
    assert_eq!(belief.solution_candidates(Category::Room).len(), 6);
    assert_eq!(belief.suggestion_count(), 5);
    assert_eq!(belief.solved(), None);

    // Nobody else saw White or the Dining Room being shown.
    assert_eq!(engine.belief(p(2)).status(white), CardStatus::Unknown);
    assert_eq!(engine.spectator().status(dining), CardStatus::Unknown);
}

#[test]
fn test_repeated_declines_reveal_the_solution() {
    let (mut engine, registry) = engine();
    suggest(&mut engine, &registry, p(0), solution(), None);

    let belief = engine.belief(p(0));
    for card in solution().cards() {
        assert_eq!(belief.status(card), CardStatus::KnownInSolution);
    }
    assert_eq!(belief.solved(), Some(solution()));

    // The others cannot rule out that P0 holds some of the three.
    for observer in [p(1), p(2)] {
        assert_eq!(engine.belief(observer).solved(), None);
        assert!(engine
            .belief(observer)
            .possible_holders(Card::from(Weapon::Rope))
            .players()
            .any(|holder| holder == p(0)));
    }
    assert_eq!(engine.spectator().solved(), None);
}

#[test]
fn test_declines_combine_with_category_closure() {
    let (mut engine, registry) = engine();
    // P2 learns that neither P0 nor P1 holds Mustard, Rope or the Kitchen.
    suggest(&mut engine, &registry, p(2), solution(), None);
    assert_eq!(engine.belief(p(2)).solved(), Some(solution()));

    // The spectator only learns that nobody but P2 can hold them.
    for card in solution().cards() {
        assert_eq!(engine.spectator().status(card), CardStatus::Unknown);
        assert_eq!(engine.spectator().possible_holders(card).player_count(), 1);
    }
}

#[test]
fn test_failed_accusation_is_public_knowledge() {
    let (mut engine, _) = engine();
    let wrong = Triple::new(Suspect::Mustard, Weapon::Rope, Room::Study);

    engine
        .broadcast(&Observation::AccusationMade {
            accuser: p(1),
            triple: wrong,
            correct: false,
        })
        .unwrap();

    // P1 holds the Study, so P1 learns nothing new. P0 and P2 only record
    // that not all three are the solution.
    for observer in [Perspective::Player(p(0)), Perspective::Player(p(2)), Perspective::Spectator] {
        let belief = match observer {
            Perspective::Player(player) => engine.belief(player),
            Perspective::Spectator => engine.spectator(),
        };
        assert!(belief
            .constraints()
            .iter()
            .any(|c| matches!(c, Constraint::NotAllInSolution { .. })));
    }
}

#[test]
fn test_correct_accusation_solves_for_everyone() {
    let (mut engine, _) = engine();
    engine
        .broadcast(&Observation::AccusationMade {
            accuser: p(2),
            triple: solution(),
            correct: true,
        })
        .unwrap();

    for belief in engine.beliefs().values() {
        assert_eq!(belief.solved(), Some(solution()));
    }
    assert_eq!(engine.spectator().solved(), Some(solution()));
}

#[test]
fn test_lying_disproof_is_detected() {
    let (mut engine, _) = engine();
    // P0 holds Scarlet; a claim that P1 showed it cannot be true.
    let err = engine
        .broadcast(&Observation::DisproofShown {
            disprover: p(1),
            suggester: p(0),
            triple: Triple::new(Suspect::Scarlet, Weapon::Rope, Room::Hall),
            card: Some(Card::from(Suspect::Scarlet)),
        })
        .unwrap_err();

    assert!(matches!(
        err,
        ClueError::KnowledgeInconsistency {
            perspective: Perspective::Player(_),
            reason: Inconsistency::Contradiction { .. },
        }
    ));
}
