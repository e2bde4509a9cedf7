use maras_core::{ClosureLattice, Interaction, ItemDomain, MinedRule, RuleStats};

pub const DEFAULT_SEED: u32 = 0xc0ffee;

pub struct SyntheticOptions {
    pub domain: ItemDomain,
    pub rules: usize,
    /// Share of rules whose interaction is registered as closed, in percent
    pub closed_pct: u32,
    /// Share of antecedent/consequent items drawn from the "wrong" side, in percent
    pub noise_pct: u32,
    pub seed: u32,
}

pub struct SyntheticWorkload {
    pub rules: Vec<MinedRule>,
    pub closures: ClosureLattice,
}

fn create_rng(seed: u32) -> impl FnMut() -> f64 {
    let mut state = seed;
    move || {
        state = state.wrapping_mul(1664525).wrapping_add(1013904223);
        (state as f64) / (u32::MAX as f64)
    }
}

fn rand_int(rand: &mut impl FnMut() -> f64, min: usize, max: usize) -> usize {
    let span = max - min + 1;
    min + ((rand() * span as f64) as usize).min(span - 1)
}

fn chance(rand: &mut impl FnMut() -> f64, pct: u32) -> bool {
    rand() * 100.0 < pct as f64
}

/// Generate mined rules shaped like a drug/reaction rule miner's output.
pub fn generate(opts: &SyntheticOptions) -> Result<SyntheticWorkload, String> {
    let domain = opts.domain;
    if domain.drug_count() == 0 || domain.reaction_count() == 0 {
        return Err("Synthetic workload needs at least one drug and one reaction".to_string());
    }

    let mut rng = create_rng(opts.seed);
    let mut rules = Vec::with_capacity(opts.rules);
    let mut closed = Vec::new();

    for _ in 0..opts.rules {
        let mut used: Vec<i32> = Vec::new();
        let ante_len = rand_int(&mut rng, 1, 3);
        let cons_len = rand_int(&mut rng, 1, 2);
        let antecedent = draw_items(&mut rng, &domain, ante_len, true, opts.noise_pct, &mut used);
        let consequent = draw_items(&mut rng, &domain, cons_len, false, opts.noise_pct, &mut used);

        let transactions = rand_int(&mut rng, 20, 500) as f64;
        let coverage = rand_int(&mut rng, 5, 200) as f64;
        let absolute_support = rand_int(&mut rng, 1, coverage as usize) as u64;
        let confidence = absolute_support as f64 / coverage;
        let consequent_support = rand_int(&mut rng, absolute_support as usize, 400) as f64;
        let lift = confidence / (consequent_support / transactions);

        if chance(&mut rng, opts.closed_pct) {
            let items = used
                .iter()
                .map(|&code| domain.decode(code))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| format!("Generated invalid item: {}", e))?;
            closed.push(Interaction::new(items));
        }

        rules.push(MinedRule::new(
            antecedent,
            consequent,
            RuleStats {
                coverage,
                absolute_support,
                confidence,
                lift,
            },
        ));
    }

    Ok(SyntheticWorkload {
        rules,
        closures: ClosureLattice::from_closures(closed),
    })
}

fn draw_items(
    rand: &mut impl FnMut() -> f64,
    domain: &ItemDomain,
    count: usize,
    drugs: bool,
    noise_pct: u32,
    used: &mut Vec<i32>,
) -> Vec<i32> {
    let mut items = Vec::with_capacity(count);
    let mut attempts = 0;
    while items.len() < count && attempts < count * 8 {
        attempts += 1;
        let want_drug = drugs != chance(rand, noise_pct);
        let code = if want_drug {
            rand_int(rand, 0, domain.drug_count() as usize - 1)
        } else {
            domain.drug_count() as usize + rand_int(rand, 0, domain.reaction_count() as usize - 1)
        };
        let code = code as i32;
        if !used.contains(&code) {
            used.push(code);
            items.push(code);
        }
    }
    items
}
