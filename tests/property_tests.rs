//! Property tests for the deal and for belief propagation.

use proptest::prelude::*;

use rust_clue::cards::{Card, CardRegistry, Room, Suspect, Triple, Weapon};
use rust_clue::core::{GameRng, PlayerId};
use rust_clue::knowledge::{BeliefState, CardStatus, KnowledgeEngine, Observation};

/// A suggestion by seat `suggester % players`.
#[derive(Clone, Debug)]
struct Probe {
    suggester: usize,
    suspect: usize,
    weapon: usize,
    room: usize,
    accuse: bool,
}

fn arb_probe() -> impl Strategy<Value = Probe> {
    (0..6usize, 0..6usize, 0..6usize, 0..9usize, prop::bool::weighted(0.1)).prop_map(
        |(suggester, suspect, weapon, room, accuse)| Probe {
            suggester,
            suspect,
            weapon,
            room,
            accuse,
        },
    )
}

/// Observations a real table would produce for `probe`.
fn observations(registry: &CardRegistry, probe: &Probe) -> Vec<Observation> {
    let suggester = PlayerId::new((probe.suggester % registry.player_count()) as u8);
    let triple = Triple::new(
        Suspect::ALL[probe.suspect],
        Weapon::ALL[probe.weapon],
        Room::ALL[probe.room],
    );

    if probe.accuse {
        return vec![Observation::AccusationMade {
            accuser: suggester,
            triple,
            correct: registry.solution().matches(&triple),
        }];
    }

    let mut out = vec![Observation::SuggestionMade { suggester, triple }];
    for candidate in suggester.clockwise_after(registry.player_count()) {
        match registry.hand(candidate).matching(&triple).first() {
            Some(&card) => {
                out.push(Observation::DisproofShown {
                    disprover: candidate,
                    suggester,
                    triple,
                    card: Some(card),
                });
                break;
            }
            None => out.push(Observation::DisproofDeclined {
                player: candidate,
                triple,
            }),
        }
    }
    out
}

fn assert_sound(belief: &BeliefState, registry: &CardRegistry) {
    for card in Card::all() {
        match belief.status(card) {
            CardStatus::KnownInSolution => assert!(registry.solution().contains(card)),
            CardStatus::KnownHeld(Some(holder)) => assert_eq!(registry.holder_of(card), Some(holder)),
            CardStatus::KnownHeld(None) => assert!(!registry.solution().contains(card)),
            CardStatus::Unknown => {}
        }
    }
}

proptest! {
    #[test]
    fn test_deal_partitions_the_deck(seed in any::<u64>(), players in 3usize..=6) {
        let registry = CardRegistry::deal(players, &mut GameRng::new(seed)).unwrap();
        prop_assert!(registry.validate().is_ok());

        let solution = registry.solution().reveal();
        for card in Card::all() {
            let holders = registry.hands().values().filter(|h| h.contains(card)).count();
            let in_solution = usize::from(solution.contains(card));
            prop_assert_eq!(holders + in_solution, 1);
        }

        let sizes: Vec<usize> = registry.hands().values().map(|h| h.len()).collect();
        prop_assert_eq!(sizes.iter().sum::<usize>(), 18);
        let (min, max) = (sizes.iter().min().unwrap(), sizes.iter().max().unwrap());
        prop_assert!(max - min <= 1);
    }

    #[test]
    fn test_beliefs_are_sound_and_monotone(
        seed in any::<u64>(),
        players in 3usize..=6,
        probes in prop::collection::vec(arb_probe(), 1..40),
    ) {
        let registry = CardRegistry::deal(players, &mut GameRng::new(seed)).unwrap();
        let mut engine = KnowledgeEngine::new(registry.hand_sizes(), false);
        engine.seed_hands(&registry).unwrap();

        for probe in &probes {
            let before: Vec<_> = engine.beliefs().values().map(BeliefState::statuses).collect();
            for observation in observations(&registry, probe) {
                let deltas = engine.broadcast(&observation).unwrap();
                for (_, delta) in &deltas {
                    prop_assert!(delta.passes <= Card::COUNT as u32);
                }
            }

            for (belief, earlier) in engine.beliefs().values().zip(&before) {
                assert_sound(belief, &registry);
                for card in Card::all() {
                    prop_assert!(belief.status(card).refines(earlier[card.index()]));
                }
            }
            assert_sound(engine.spectator(), &registry);
        }
    }

    #[test]
    fn test_solved_beliefs_match_the_solution(
        seed in any::<u64>(),
        probes in prop::collection::vec(arb_probe(), 1..60),
    ) {
        let registry = CardRegistry::deal(3, &mut GameRng::new(seed)).unwrap();
        let mut engine = KnowledgeEngine::new(registry.hand_sizes(), true);
        engine.seed_hands(&registry).unwrap();

        for probe in &probes {
            for observation in observations(&registry, probe) {
                engine.broadcast(&observation).unwrap();
            }
        }
        for belief in engine.beliefs().values() {
            if let Some(solved) = belief.solved() {
                prop_assert_eq!(solved, registry.solution().reveal());
            }
        }
    }
}
