/*!
# Preference-Based Matching

Algorithms assigning items or partners to agents with strict ranked
preferences:

- [`serial_dictatorship`] — agents pick in a fixed (or shuffled) priority
  order, each taking its best still-free item.
- [`top_trading_cycles`] — endowed agents trade along cycles of mutual
  top choices; the pointer graph is an ordinary directed [`Graph`] and the
  cycles come out of [`CycleSearch::find_cycle`].
- [`stable_marriage`] — proposer-proposing deferred acceptance; the result
  contains no blocking pair.

All three return a [`Matching`], a bipartite pairing store.
*/

use fxhash::{FxHashMap, FxHashSet};
use rand::{seq::SliceRandom, Rng};

use super::*;

/// Capability of agents ranking a set of alternatives: a strict preference
/// list, most-preferred first. Alternatives absent from the list are
/// unacceptable to the agent.
pub trait Preferences<I> {
    /// The agent's ranking, best first.
    fn preferences(&self) -> &[I];
}

/// Capability of agents that initially own an item.
pub trait Endowed<I> {
    /// The item this agent brings into the market.
    fn endowment(&self) -> &I;
}

/// A pairing between two registered participant sets.
///
/// Participants must be registered (via `add_*`) before they count as
/// *unmatched*; [`Matching::assign`] registers its arguments implicitly.
/// Re-assigning a participant dissolves its previous pair on both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matching<A: Value, B: Value> {
    left: FxHashMap<A, Option<B>>,
    right: FxHashMap<B, Option<A>>,
}

impl<A: Value, B: Value> Matching<A, B> {
    /// Creates an empty matching with no registered participants.
    pub fn new() -> Self {
        Self {
            left: FxHashMap::default(),
            right: FxHashMap::default(),
        }
    }

    /// Registers a left-side participant as unmatched. Returns *true*
    /// exactly if it was not registered before.
    pub fn add_left(&mut self, a: A) -> bool {
        if self.left.contains_key(&a) {
            return false;
        }
        self.left.insert(a, None);
        true
    }

    /// Registers a right-side participant as unmatched. Returns *true*
    /// exactly if it was not registered before.
    pub fn add_right(&mut self, b: B) -> bool {
        if self.right.contains_key(&b) {
            return false;
        }
        self.right.insert(b, None);
        true
    }

    /// Registers all left-side participants of an iterator.
    pub fn add_left_all(&mut self, items: impl IntoIterator<Item = A>) {
        for a in items {
            self.add_left(a);
        }
    }

    /// Registers all right-side participants of an iterator.
    pub fn add_right_all(&mut self, items: impl IntoIterator<Item = B>) {
        for b in items {
            self.add_right(b);
        }
    }

    /// Pairs `a` with `b`, dissolving any pair either was part of before.
    /// Unregistered arguments are registered on the fly.
    pub fn assign(&mut self, a: A, b: B) {
        if let Some(Some(old_b)) = self.left.insert(a.clone(), Some(b.clone())) {
            if old_b != b {
                self.right.insert(old_b, None);
            }
        }
        if let Some(Some(old_a)) = self.right.insert(b, Some(a.clone())) {
            if old_a != a {
                self.left.insert(old_a, None);
            }
        }
    }

    /// Returns the partner of a left-side participant, if matched.
    pub fn partner_of_left(&self, a: &A) -> Option<&B> {
        self.left.get(a).and_then(|p| p.as_ref())
    }

    /// Returns the partner of a right-side participant, if matched.
    pub fn partner_of_right(&self, b: &B) -> Option<&A> {
        self.right.get(b).and_then(|p| p.as_ref())
    }

    /// Returns *true* if the value is registered on the left side.
    pub fn contains_left(&self, a: &A) -> bool {
        self.left.contains_key(a)
    }

    /// Returns *true* if the value is registered on the right side.
    pub fn contains_right(&self, b: &B) -> bool {
        self.right.contains_key(b)
    }

    /// Returns *true* if the left-side participant currently has a partner.
    pub fn is_matched_left(&self, a: &A) -> bool {
        self.partner_of_left(a).is_some()
    }

    /// Returns *true* if the right-side participant currently has a partner.
    pub fn is_matched_right(&self, b: &B) -> bool {
        self.partner_of_right(b).is_some()
    }

    /// Returns *true* if the value is registered on the left side and has
    /// no partner.
    pub fn is_unmatched_left(&self, a: &A) -> bool {
        matches!(self.left.get(a), Some(None))
    }

    /// Returns *true* if the value is registered on the right side and has
    /// no partner.
    pub fn is_unmatched_right(&self, b: &B) -> bool {
        matches!(self.right.get(b), Some(None))
    }

    /// Iterates over all current pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&A, &B)> + '_ {
        self.left
            .iter()
            .filter_map(|(a, b)| b.as_ref().map(|b| (a, b)))
    }

    /// Number of current pairs.
    pub fn number_of_pairs(&self) -> usize {
        self.pairs().count()
    }
}

/// Matches agents to items by serial dictatorship: agents pick in the
/// given priority order, each taking the highest-ranked item of its
/// preference list that is registered and still free. An agent whose list
/// is exhausted stays unmatched.
///
/// Fails with [`GraphError::InvalidArgument`] iff the ordering contains a
/// duplicate agent.
pub fn serial_dictatorship<A, I>(
    order: &[A],
    items: impl IntoIterator<Item = I>,
) -> Result<Matching<A, I>>
where
    A: Preferences<I> + Value,
    I: Value,
{
    let mut matching = Matching::new();
    matching.add_right_all(items);
    for a in order {
        if !matching.add_left(a.clone()) {
            return Err(GraphError::InvalidArgument(format!(
                "duplicate agent {a:?} in priority order"
            )));
        }
    }

    for a in order {
        let pick = a
            .preferences()
            .iter()
            .find(|item| matching.is_unmatched_right(item));
        if let Some(item) = pick.cloned() {
            matching.assign(a.clone(), item);
        }
    }
    Ok(matching)
}

/// Like [`serial_dictatorship`], but the priority order is drawn uniformly
/// at random from the provided generator.
pub fn serial_dictatorship_shuffled<A, I, R>(
    agents: &[A],
    items: impl IntoIterator<Item = I>,
    rng: &mut R,
) -> Result<Matching<A, I>>
where
    A: Preferences<I> + Value,
    I: Value,
    R: Rng,
{
    let mut order = agents.to_vec();
    order.shuffle(rng);
    serial_dictatorship(&order, items)
}

/// Reallocates endowed items by top trading cycles.
///
/// Each round builds a directed pointer graph: every still-active agent
/// points to the current owner of its most-preferred still-available item
/// (possibly itself). A functional graph always contains a cycle; every
/// agent on it receives the item it points at and leaves the market with
/// it. Rounds repeat until no agent is left.
///
/// Fails with [`GraphError::InvalidArgument`] on duplicate agents or
/// duplicate endowments, and with [`GraphError::AlgorithmFailure`] iff an
/// active agent exhausts its preference list — which can only happen when
/// preferences are incomplete.
pub fn top_trading_cycles<A, I>(agents: &[A]) -> Result<Matching<A, I>>
where
    A: Preferences<I> + Endowed<I> + Value,
    I: Value,
{
    let mut matching = Matching::new();
    for a in agents {
        if !matching.add_left(a.clone()) {
            return Err(GraphError::InvalidArgument(format!(
                "duplicate agent {a:?}"
            )));
        }
        if !matching.add_right(a.endowment().clone()) {
            return Err(GraphError::InvalidArgument(format!(
                "item {:?} is endowed to more than one agent",
                a.endowment()
            )));
        }
    }

    let mut owner: FxHashMap<I, usize> = agents
        .iter()
        .enumerate()
        .map(|(i, a)| (a.endowment().clone(), i))
        .collect();
    let mut active: Vec<usize> = (0..agents.len()).collect();
    let mut cursor = vec![0usize; agents.len()];

    while !active.is_empty() {
        let mut graph: Graph<usize, usize> = Graph::new_directed();
        for &i in &active {
            graph.add_vertex(i);
        }
        for (eid, &i) in active.iter().enumerate() {
            let prefs = agents[i].preferences();
            while cursor[i] < prefs.len() && !owner.contains_key(&prefs[cursor[i]]) {
                cursor[i] += 1;
            }
            if cursor[i] == prefs.len() {
                return Err(GraphError::AlgorithmFailure(format!(
                    "agent {:?} has no acceptable item remaining",
                    agents[i]
                )));
            }
            graph.add_edge(&i, &owner[&prefs[cursor[i]]], eid)?;
        }

        // every vertex has out-degree one, so a cycle must exist
        let cycle = graph.find_cycle().unwrap();
        let mut movers = Vec::with_capacity(cycle.len());
        for &e in &cycle {
            movers.push(*graph.source_of(e)?);
        }

        let retired: FxHashSet<usize> = movers.iter().copied().collect();
        for i in movers {
            let item = agents[i].preferences()[cursor[i]].clone();
            owner.remove(&item);
            matching.assign(agents[i].clone(), item);
        }
        active.retain(|j| !retired.contains(j));
    }

    Ok(matching)
}

/// Computes a stable matching between proposers and proposees by deferred
/// acceptance.
///
/// Every free proposer walks down its own preference list, skipping values
/// not registered as proposees. A proposee accepts when unmatched or when
/// it strictly prefers the newcomer over its current partner (a proposer
/// it does not rank is never strictly preferred), bumping the previous
/// partner back into the free pool. Proposers whose list runs out stay
/// unmatched.
///
/// The result contains no blocking pair: no proposer/proposee pair ranks
/// each other strictly above their assigned partners.
///
/// Fails with [`GraphError::InvalidArgument`] iff either input slice
/// contains a duplicate.
pub fn stable_marriage<A>(proposers: &[A], proposees: &[A]) -> Result<Matching<A, A>>
where
    A: Preferences<A> + Value,
{
    let mut matching = Matching::new();
    for p in proposers {
        if !matching.add_left(p.clone()) {
            return Err(GraphError::InvalidArgument(format!(
                "duplicate proposer {p:?}"
            )));
        }
    }
    for q in proposees {
        if !matching.add_right(q.clone()) {
            return Err(GraphError::InvalidArgument(format!(
                "duplicate proposee {q:?}"
            )));
        }
    }

    let proposer_index: FxHashMap<&A, usize> =
        proposers.iter().enumerate().map(|(i, p)| (p, i)).collect();
    let proposee_index: FxHashMap<&A, usize> =
        proposees.iter().enumerate().map(|(i, q)| (q, i)).collect();
    // rank[qi] maps proposers to their position in proposee qi's list
    let rank: Vec<FxHashMap<&A, usize>> = proposees
        .iter()
        .map(|q| {
            q.preferences()
                .iter()
                .enumerate()
                .map(|(r, p)| (p, r))
                .collect()
        })
        .collect();

    let mut next_choice = vec![0usize; proposers.len()];
    let mut free: Vec<usize> = (0..proposers.len()).rev().collect();

    while let Some(pi) = free.pop() {
        let prefs = proposers[pi].preferences();
        let mut i = next_choice[pi];

        while i < prefs.len() {
            let choice = &prefs[i];
            i += 1;

            let Some(&qi) = proposee_index.get(choice) else {
                continue; // not part of the opposite set
            };

            match matching.partner_of_right(choice).cloned() {
                None => {
                    matching.assign(proposers[pi].clone(), choice.clone());
                    break;
                }
                Some(current) => {
                    let newcomer_rank = rank[qi].get(&proposers[pi]);
                    let current_rank = rank[qi].get(&current);
                    let prefers_newcomer = match (newcomer_rank, current_rank) {
                        (Some(n), Some(c)) => n < c,
                        (Some(_), None) => true,
                        _ => false,
                    };
                    if prefers_newcomer {
                        let bumped = proposer_index[&current];
                        matching.assign(proposers[pi].clone(), choice.clone());
                        free.push(bumped);
                        break;
                    }
                }
            }
        }

        next_choice[pi] = i;
    }

    Ok(matching)
}
