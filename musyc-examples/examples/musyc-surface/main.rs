//! Combined effect surface of the MuSyC model
//!
//! E = U*E0 + A1*E1 + A2*E2 + (1 - U - A1 - A2)*E3
//!
//! Prints the effect grid on a coarse lattice for a synergistic efficacy (beta > 0) and a
//! potency interaction of drug 1 on drug 2 (alpha12 > 1).

use musyc::{DoseLattice, Musyc, Parameters, Result};

fn main() -> Result<()> {
    let params = Parameters::default().with_beta(0.5).with_alpha(10., 1.);
    println!("{params:?}");
    println!("beta = {:.3}, E3 = {:.3}\n", params.beta(), params.e3);

    let lattice = DoseLattice::new(6, -2., 2.)?;
    let model = Musyc::new(params)?;
    let effect = model.surface(lattice.d1(), lattice.d2())?;
    let grid = lattice.grid(&effect)?;

    let header = lattice
        .axis()
        .iter()
        .map(|d| format!("{d:>8.3}"))
        .collect::<Vec<String>>()
        .join(" ");
    println!("{:>8} {header}", "d2 \\ d1");
    for (r, row) in grid.z.row_iter().enumerate() {
        let values = row
            .iter()
            .map(|e| format!("{e:>8.4}"))
            .collect::<Vec<String>>()
            .join(" ");
        println!("{:>8.3} {values}", grid.d2[(r, 0)]);
    }

    let w = model.weights(1., 1.);
    println!(
        "\noccupancy at d1 = d2 = 1: U {:.3}, A1 {:.3}, A2 {:.3}, A12 {:.3}",
        w.u,
        w.a1,
        w.a2,
        w.a12()
    );
    Ok(())
}
