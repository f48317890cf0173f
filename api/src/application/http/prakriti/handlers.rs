pub mod predict_dosha;
