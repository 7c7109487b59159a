#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArbiterStats {
    pub registrations: usize,
    pub deregistrations: usize,
    pub refreshes: usize,
}

impl ArbiterStats {
    pub fn record_registration(&mut self) {
        self.registrations += 1;
    }

    pub fn record_deregistration(&mut self) {
        self.deregistrations += 1;
    }

    pub fn record_refresh(&mut self) {
        self.refreshes += 1;
    }
}
