use hookwire::record;

#[record(lenient = true)]
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardAccessOut {
    pub token: String,
    pub url: String,
}
