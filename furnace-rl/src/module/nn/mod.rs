pub mod multi_layer_perceptron;
pub mod q_network;
