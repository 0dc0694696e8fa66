/// Pearson correlation over the rows where both cells are present.
///
/// Returns `None` when fewer than two complete pairs exist or either side
/// has zero variance over those pairs.
pub fn pearson(x_values: &[Option<f64>], y_values: &[Option<f64>]) -> Option<f64> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x_values
        .iter()
        .zip(y_values.iter())
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .unzip();

    pearson_complete(&xs, &ys)
}

/// Pearson correlation for two complete, equally long series
pub fn pearson_complete(x_values: &[f64], y_values: &[f64]) -> Option<f64> {
    if x_values.len() < 2 || x_values.len() != y_values.len() {
        return None;
    }

    let n = x_values.len() as f64;
    let mean_x = x_values.iter().sum::<f64>() / n;
    let mean_y = y_values.iter().sum::<f64>() / n;

    let (covariance, variance_x, variance_y) = x_values
        .iter()
        .zip(y_values.iter())
        .map(|(x, y)| {
            let diff_x = x - mean_x;
            let diff_y = y - mean_y;
            (diff_x * diff_y, diff_x * diff_x, diff_y * diff_y)
        })
        .fold((0.0, 0.0, 0.0), |acc, (cov, var_x, var_y)| {
            (acc.0 + cov, acc.1 + var_x, acc.2 + var_y)
        });

    if variance_x == 0.0 || variance_y == 0.0 {
        return None;
    }

    // Rounding can push |r| a hair past 1
    Some((covariance / (variance_x.sqrt() * variance_y.sqrt())).clamp(-1.0, 1.0))
}
