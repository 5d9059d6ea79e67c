//! Loewe synergy of a MuSyC surface
//!
//! Loewe = d1 / D1(E) + d2 / D2(E), shown as -ln(Loewe)
//!
//! D1 and D2 are the single drug doses reaching the combined effect E. Effects beyond the
//! reach of one single drug leave the index undefined.

use musyc::{DoseLattice, Musyc, Parameters, Result, synergy};

fn main() -> Result<()> {
    let lattice = DoseLattice::default();
    // equal efficacies, unit slopes and no potency interaction
    let loewe_null = Parameters::default()
        .with_emax(0.5, 0.5)
        .with_e3(0.5)
        .with_slopes(1., 1.)
        .with_alpha(0., 0.);

    for (name, params) in [
        ("loewe null", loewe_null),
        ("potentiated", loewe_null.with_alpha(10., 10.)),
        ("steep", loewe_null.with_slopes(3., 3.)),
    ] {
        let effect = Musyc::new(params)?.surface(lattice.d1(), lattice.d2())?;
        let loewe = synergy::loewe(lattice.d1(), lattice.d2(), &effect, &params)?;
        let centered = synergy::neg_log(&loewe);
        let defined: Vec<f64> = centered.iter().copied().filter(|v| v.is_finite()).collect();
        let (min, max) = defined
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            });
        println!(
            "{name:<12} defined {:>4}/{}  -ln(loewe) in [{min:>+.4}, {max:>+.4}]",
            defined.len(),
            lattice.len()
        );
    }
    Ok(())
}
