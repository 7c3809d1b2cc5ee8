use mazegraph::{
    generators::{Generator, generate_maze},
    maze::{Coords, Maze, MazeView},
    solvers::{Solver, solve_maze},
};

const SIZES: [(usize, usize); 5] = [(1, 1), (2, 2), (1, 7), (6, 1), (9, 6)];
const SEEDS: [u64; 3] = [0, 7, 1234];

fn perfect_generators() -> impl Iterator<Item = Generator> {
    Generator::ALL.into_iter().filter(Generator::is_perfect)
}

#[test]
fn perfect_generators_build_spanning_trees() {
    for generator in perfect_generators() {
        for (width, height) in SIZES {
            for seed in SEEDS {
                let mut maze = Maze::new(width, height).unwrap();
                generate_maze(&mut maze, generator, Some(seed)).unwrap();
                let cells = width * height;
                let graph = maze.graph();
                assert_eq!(
                    graph.breadth_first_order(0).len(),
                    cells,
                    "{generator} left a {width}x{height} maze disconnected (seed {seed})"
                );
                assert_eq!(
                    graph.edge_count(),
                    cells - 1,
                    "{generator} made a cycle in a {width}x{height} maze (seed {seed})"
                );
            }
        }
    }
}

#[test]
fn random_generator_connects_without_spanning() {
    let mut maze = Maze::new(8, 8).unwrap();
    let steps = generate_maze(&mut maze, Generator::Random, Some(5)).unwrap();
    assert_eq!(steps, 64);
    // Repeated picks may hit the same wall
    assert!(maze.graph().edge_count() <= 64);
    assert!(maze.graph().edge_count() > 0);
}

#[test]
fn solvers_agree_on_path_length() {
    for generator in perfect_generators() {
        for seed in SEEDS {
            let mut maze = Maze::new(12, 9).unwrap();
            generate_maze(&mut maze, generator, Some(seed)).unwrap();
            let (entrance, exit) = maze.find_longest_shortest_path();

            let bfs = solve_maze(&maze, Solver::BreadthFirst);
            let astar = solve_maze(&maze, Solver::AStar);
            assert_eq!(bfs.len(), astar.len(), "{generator} seed {seed}");
            // Perfect mazes have exactly one path
            assert_eq!(bfs, astar);

            let graph_path = maze
                .graph()
                .shortest_path(maze.id_of(entrance), maze.id_of(exit));
            assert_eq!(bfs.len(), graph_path.len());
            assert_eq!(bfs.first(), Some(&entrance));
            assert_eq!(bfs.last(), Some(&exit));
            assert!(
                bfs.windows(2)
                    .all(|w| w[0].is_adjacent(w[1]) && !maze.is_wall_between(w[0], w[1]))
            );
        }
    }
}

#[test]
fn longest_shortest_path_matches_brute_force() {
    let mut maze = Maze::new(5, 5).unwrap();
    generate_maze(&mut maze, Generator::Fusion, Some(99)).unwrap();

    let lateral = maze.lateral_cells();
    assert_eq!(lateral.len(), 16);
    let mut longest = 0;
    for (i, &a) in lateral.iter().enumerate() {
        for &b in &lateral[i + 1..] {
            let path = maze.graph().shortest_path(maze.id_of(a), maze.id_of(b));
            longest = longest.max(path.len());
        }
    }

    let (entrance, exit) = maze.find_longest_shortest_path();
    assert_eq!(maze.openings(), (entrance, exit));
    let path = maze
        .graph()
        .shortest_path(maze.id_of(entrance), maze.id_of(exit));
    assert_eq!(path.len(), longest);
}

#[test]
fn walls_are_symmetric_and_reversible() {
    let mut maze = Maze::new(4, 3).unwrap();
    let a = Coords::new(1, 1);
    let b = Coords::new(2, 1);

    maze.open_passage(a, b).unwrap();
    assert!(!maze.is_wall_between(a, b));
    assert!(!maze.is_wall_between(b, a));

    maze.close_passage(b, a).unwrap();
    assert!(maze.is_wall_between(a, b));
    assert_eq!(maze.graph().edge_count(), 0);

    // Diagonal and distant cells cannot share a passage
    assert!(maze.open_passage(a, Coords::new(2, 2)).is_err());
    assert!(maze.open_passage(a, Coords::new(3, 1)).is_err());
    assert!(maze.open_passage(a, Coords::new(9, 1)).is_err());
}

#[test]
fn all_walls_counts_inner_walls() {
    for (width, height) in SIZES {
        let mut maze = Maze::new(width, height).unwrap();
        let expected = (width - 1) * height + width * (height - 1);
        assert_eq!(maze.all_walls().len(), expected);
        maze.open_all_walls();
        assert_eq!(maze.graph().edge_count(), expected);
        maze.close_all_walls();
        assert_eq!(maze.graph().edge_count(), 0);
        assert_eq!(maze.graph().vertex_count(), width * height);
    }
}
