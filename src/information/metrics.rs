// Entropy, KL divergence and mutual information, in bits.
//
// Terms with zero probability contribute nothing (0 * log2(0) = 0), so the
// metrics are total over valid distributions. The one undefined case, KL
// divergence against a reference that rules out an outcome p can produce, is
// reported as an error rather than returned as infinity.

use super::distribution::{validate_distribution, validate_joint, InformationError};

/// Shannon entropy of `p` in bits: `-Σ pᵢ·log2(pᵢ)`.
pub fn entropy(p: &[f64]) -> Result<f64, InformationError> {
    validate_distribution(p)?;
    Ok(entropy_unchecked(p.iter().copied()))
}

/// Kullback-Leibler divergence `D(p || q)` in bits: `Σ pᵢ·log2(pᵢ/qᵢ)`.
///
/// Both arguments must index the same outcomes in the same order. Not
/// symmetric: `kl_divergence(p, q)` and `kl_divergence(q, p)` generally differ.
pub fn kl_divergence(p: &[f64], q: &[f64]) -> Result<f64, InformationError> {
    validate_distribution(p)?;
    validate_distribution(q)?;
    if p.len() != q.len() {
        return Err(InformationError::LengthMismatch {
            left: p.len(),
            right: q.len(),
        });
    }

    let mut divergence = 0.0;
    for (index, (&pi, &qi)) in p.iter().zip(q).enumerate() {
        if pi == 0.0 {
            continue;
        }
        if qi == 0.0 {
            return Err(InformationError::UnsupportedOutcome { index });
        }
        // Difference of logs: pi / qi overflows when qi is subnormal
        divergence += pi * (pi.log2() - qi.log2());
    }

    // Rounding can leave a tiny negative residue when p == q
    Ok(divergence.max(0.0))
}

/// Mutual information `I(X;Y)` in bits of the joint table `joint`, where rows
/// are outcomes of X and columns are outcomes of Y.
pub fn mutual_information(joint: &[Vec<f64>]) -> Result<f64, InformationError> {
    let (rows, cols) = marginals(joint)?;

    let mut information = 0.0;
    for (i, values) in joint.iter().enumerate() {
        for (j, &pxy) in values.iter().enumerate() {
            // rows[i] * cols[j] can underflow to 0 for tiny marginals, so
            // each log is taken separately
            if pxy > 0.0 {
                information += pxy * (pxy.log2() - rows[i].log2() - cols[j].log2());
            }
        }
    }

    Ok(information.max(0.0))
}

/// Row and column marginals of a joint table: `(P(X), P(Y))`.
pub fn marginals(joint: &[Vec<f64>]) -> Result<(Vec<f64>, Vec<f64>), InformationError> {
    validate_joint(joint)?;

    let width = joint[0].len();
    let rows: Vec<f64> = joint.iter().map(|row| row.iter().sum()).collect();
    let mut cols = vec![0.0; width];
    for row in joint {
        for (col, value) in cols.iter_mut().zip(row) {
            *col += value;
        }
    }

    Ok((rows, cols))
}

/// Joint entropy `H(X,Y)` in bits.
pub fn joint_entropy(joint: &[Vec<f64>]) -> Result<f64, InformationError> {
    validate_joint(joint)?;
    Ok(entropy_unchecked(joint.iter().flatten().copied()))
}

/// The joint table of two independent variables: `joint[i][j] = p[i] * q[j]`.
pub fn outer_product(p: &[f64], q: &[f64]) -> Result<Vec<Vec<f64>>, InformationError> {
    validate_distribution(p)?;
    validate_distribution(q)?;
    Ok(p.iter()
        .map(|&pi| q.iter().map(|&qj| pi * qj).collect())
        .collect())
}

fn entropy_unchecked(p: impl Iterator<Item = f64>) -> f64 {
    let h: f64 = p.filter(|&pi| pi > 0.0).map(|pi| -pi * pi.log2()).sum();
    // -0.0 for a point mass
    h.max(0.0)
}
