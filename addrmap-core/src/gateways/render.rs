use crate::entities::MapView;

pub trait MapRenderer: Send + Sync {
    fn render(&self, view: &MapView);
    fn show_problem(&self, problem: &str);
}
