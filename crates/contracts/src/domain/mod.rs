pub mod a001_op;
pub mod a002_wip;
pub mod a003_hilo;
pub mod a004_avio;
pub mod a005_tela;
