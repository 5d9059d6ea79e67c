//! Bliss excess of a MuSyC surface
//!
//! Bliss = E1(d1) * E2(d2) - E(d1, d2)
//!
//! Under the Bliss null (E3 = E1 * E2 without potency or cooperativity interaction) the
//! excess stays close to zero, an efficacious combination (beta > 0) raises it.

use musyc::{DoseLattice, Musyc, Parameters, Result, get_beta, synergy};

fn summary(name: &str, lattice: &DoseLattice, params: &Parameters) -> Result<()> {
    let effect = Musyc::new(*params)?.surface(lattice.d1(), lattice.d2())?;
    let bliss = synergy::bliss(lattice.d1(), lattice.d2(), &effect, params)?;
    println!(
        "{name:<12} beta {:>+.3}  min {:>+.4}  max {:>+.4}  mean {:>+.4}",
        params.beta(),
        bliss.min(),
        bliss.max(),
        bliss.mean()
    );
    Ok(())
}

fn main() -> Result<()> {
    let lattice = DoseLattice::default();
    let base = Parameters::default();

    let bliss_beta = get_beta(base.e0, base.e1, base.e2, base.e1 * base.e2);
    let bliss_null = base.with_beta(bliss_beta);
    summary("bliss null", &lattice, &bliss_null)?;
    summary("musyc null", &lattice, &base.with_beta(0.))?;
    summary("synergistic", &lattice, &base.with_beta(1.))?;
    summary("antagonistic", &lattice, &base.with_beta(-0.5))?;
    Ok(())
}
