use lloyd::Kmeans;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const WIDTH: usize = 40;
const HEIGHT: usize = 16;
const MARKS: [char; 5] = ['g', 'r', 'b', 'y', 'm'];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Train on two blobs, then draw the first two coordinates as a text
    // scatter plot: one letter per cluster, `X` for centroids.
    //
    // This is the rendering side only. The model is read through its
    // accessors and never mutated here.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Interleave the blobs so the first two points seed different clusters.
    let mut points: Vec<Vec<f64>> = Vec::new();
    for i in 0..12 {
        let t = i as f64 * 0.7;
        points.push(vec![1.0 + t.sin(), 1.5 + t.cos()]);
        points.push(vec![8.0 + (t * 1.3).cos(), 5.0 + (t * 0.9).sin()]);
    }

    let mut model = Kmeans::new(2);
    model.train(&points)?;

    let stats = model.stats()?;
    println!(
        "iterations={} converged={} inertia={:.3}",
        stats.iterations, stats.converged, stats.inertia
    );

    let centroids = model.centroids()?;
    let (min_x, max_x, min_y, max_y) = bounds(&points);
    let cell = |x: f64, y: f64| {
        let cx = ((x - min_x) / (max_x - min_x) * (WIDTH - 1) as f64).round() as usize;
        let cy = ((y - min_y) / (max_y - min_y) * (HEIGHT - 1) as f64).round() as usize;
        (cx.min(WIDTH - 1), HEIGHT - 1 - cy.min(HEIGHT - 1))
    };

    let mut grid = vec![vec!['.'; WIDTH]; HEIGHT];
    for (id, members) in model.assignment()?.iter() {
        for &i in members {
            let (cx, cy) = cell(points[i][0], points[i][1]);
            grid[cy][cx] = MARKS[id % MARKS.len()];
        }
    }
    for c in centroids.rows() {
        let (cx, cy) = cell(c[0], c[1]);
        grid[cy][cx] = 'X';
    }

    for row in grid {
        println!("{}", row.into_iter().collect::<String>());
    }
    for (id, c) in centroids.rows().into_iter().enumerate() {
        println!(
            "cluster {id}: centroid=({:.3}, {:.3}) size={}",
            c[0],
            c[1],
            model.assignment()?.len_of(id)
        );
    }

    println!("predict(2.0, 2.0) -> {}", model.predict(&[2.0, 2.0])?);
    Ok(())
}

fn bounds(points: &[Vec<f64>]) -> (f64, f64, f64, f64) {
    points.iter().fold(
        (f64::MAX, f64::MIN, f64::MAX, f64::MIN),
        |(lx, hx, ly, hy), p| (lx.min(p[0]), hx.max(p[0]), ly.min(p[1]), hy.max(p[1])),
    )
}
