use libgame::{Board, Condition, Position, Rule};
use proptest::prelude::*;

/// Next state computed straight from a snapshot, without the board's topology.
fn reference_step(size: usize, rule: &Rule, snapshot: &[bool]) -> Vec<bool> {
    let alive_at = |x: isize, y: isize| {
        x >= 0
            && y >= 0
            && (x as usize) < size
            && (y as usize) < size
            && snapshot[y as usize * size + x as usize]
    };

    (0..size * size)
        .map(|index| {
            let (x, y) = ((index % size) as isize, (index / size) as isize);
            let mut count = 0;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if (dx, dy) != (0, 0) && alive_at(x + dx, y + dy) {
                        count += 1;
                    }
                }
            }
            rule.next_state(snapshot[index], count)
        })
        .collect()
}

fn arb_condition() -> impl Strategy<Value = Condition> {
    proptest::collection::vec(0usize..=8, 0..5)
        .prop_map(|counts| Condition::from_set(counts).unwrap())
}

fn arb_rule() -> impl Strategy<Value = Rule> {
    (arb_condition(), arb_condition()).prop_map(|(survive, birth)| Rule::new(survive, birth))
}

proptest! {
    #[test]
    fn cell_count_is_size_squared(size in 1usize..40) {
        let board = Board::new(size, Rule::conway()).unwrap();
        prop_assert_eq!(board.len(), size * size);
        prop_assert_eq!(board.cells().count(), size * size);
    }

    #[test]
    fn neighbour_counts_stay_in_range(size in 1usize..20, seed: u64) {
        let mut board = Board::new(size, Rule::conway()).unwrap();
        board.set_random_board(Some(seed));
        board.generation();

        for (pos, cell) in &board {
            let neighbours = board.neighbours(pos).unwrap().count();
            let on_x_edge = pos.x == 0 || pos.x == size - 1;
            let on_y_edge = pos.y == 0 || pos.y == size - 1;

            if size >= 3 {
                let expected = match (on_x_edge, on_y_edge) {
                    (true, true) => 3,
                    (true, false) | (false, true) => 5,
                    (false, false) => 8,
                };
                prop_assert_eq!(neighbours, expected);
            }
            prop_assert!(neighbours <= 8);
            prop_assert!((cell.alive_neighbours as usize) <= neighbours);
        }
    }

    #[test]
    fn generation_matches_snapshot_reference(size in 1usize..16, seed: u64, rule in arb_rule()) {
        let mut board = Board::new(size, rule).unwrap();
        board.set_random_board(Some(seed));
        let expected = reference_step(size, &rule, &board.alive_snapshot());

        let mut parallel = board.clone();
        board.generation();
        parallel.par_generation();

        prop_assert_eq!(board.alive_snapshot(), expected.clone());
        prop_assert_eq!(parallel.alive_snapshot(), expected);
    }

    #[test]
    fn generation_is_deterministic(size in 1usize..16, seed: u64) {
        let mut a = Board::new(size, Rule::conway()).unwrap();
        a.set_random_board(Some(seed));
        let mut b = a.clone();

        a.generation();
        b.generation();

        prop_assert_eq!(a.alive_snapshot(), b.alive_snapshot());
    }

    #[test]
    fn same_seed_same_board(size in 1usize..32, seed: u64) {
        let mut a = Board::new(size, Rule::conway()).unwrap();
        let mut b = Board::new(size, Rule::highlife()).unwrap();

        a.set_random_board(Some(seed));
        b.set_random_board(Some(seed));

        prop_assert_eq!(a.alive_snapshot(), b.alive_snapshot());
    }

    #[test]
    fn toggle_is_reversible(size in 1usize..16, seed: u64, x in 0usize..16, y in 0usize..16) {
        let mut board = Board::new(size, Rule::conway()).unwrap();
        board.set_random_board(Some(seed));
        let before = board.alive_snapshot();
        let pos = Position::new(x % size, y % size);

        board.toggle_cell(pos).unwrap();
        prop_assert_ne!(board.is_alive(pos).unwrap(), before[pos.y * size + pos.x]);
        board.toggle_cell(pos).unwrap();

        prop_assert_eq!(board.alive_snapshot(), before);
    }

    #[test]
    fn reset_clears_everything(size in 1usize..16, seed: u64) {
        let mut board = Board::new(size, Rule::conway()).unwrap();
        board.set_random_board(Some(seed));
        let neighbours: Vec<Vec<Position>> = board
            .cells()
            .map(|(pos, _)| board.neighbours(pos).unwrap().collect())
            .collect();

        board.reset();

        prop_assert_eq!(board.alive_count(), 0);
        for (index, (pos, _)) in board.cells().enumerate() {
            let after: Vec<Position> = board.neighbours(pos).unwrap().collect();
            prop_assert_eq!(&after, &neighbours[index]);
        }
    }
}
