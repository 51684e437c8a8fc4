mod helpers;
mod stations;
